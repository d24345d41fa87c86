//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Audit a WireGuard deployment from its logs, its WAN address and its tunnel
#[derive(Debug, Parser)]
#[command(name = "vpnwatch")]
#[command(about = "vpnwatch - WireGuard log analysis, exposure scanning and tunnel validation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./vpnwatch.toml, then the user config dir)
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize a WireGuard log file
    Analyze {
        /// Log file to read (default: logs.file from the configuration)
        log_file: Option<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check from outside that no management port is reachable
    Scan {
        /// WAN address or DDNS name to scan
        #[arg(short, long)]
        target: Option<String>,

        /// Per-port connect timeout (e.g. "3s", "500ms")
        #[arg(long, value_parser = parse_duration)]
        timeout: Option<Duration>,

        /// Maximum probes in flight
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        concurrency: Option<u16>,

        /// Also fail when an expected-open port is not reachable
        #[arg(long)]
        require_open: bool,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the tunnel from a connected client
    Validate {
        /// WireGuard interface name
        #[arg(short, long)]
        interface: Option<String>,

        /// Per-service connect timeout (e.g. "3s")
        #[arg(long, value_parser = parse_duration)]
        timeout: Option<Duration>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn parse_duration(value: &str) -> Result<Duration, String> {
    let duration = humantime_serde::re::humantime::parse_duration(value)
        .map_err(|e| format!("invalid duration '{}': {}", value, e))?;
    if duration.is_zero() {
        return Err("duration must be greater than 0".to_string());
    }
    Ok(duration)
}
