//! Process-level concerns: verbosity, logging setup and fatal error exit

pub mod config;
pub mod error_handling;
pub mod logging;

pub use config::AppConfig;
pub use error_handling::{fatal_exit_code, handle_fatal_error};
pub use logging::init_logging;
