//! Command-line interface: argument parsing, routing and command handlers

pub mod args;
pub mod commands;
pub mod router;

pub use args::{Cli, Commands};
pub use router::execute_command;
