//! # vpnwatch
//!
//! Audit a WireGuard deployment from three angles.
//!
//! ## Usage
//!
//! ```bash
//! vpnwatch analyze /var/log/wireguard.log
//! vpnwatch scan --target vpn.example.net
//! vpnwatch validate --interface wg0
//! ```
//!
//! ## Modules
//!
//! - `logs` - Line classification, aggregation and report rendering for tunnel logs
//! - `probe` - Bounded TCP reachability probes behind a mockable trait
//! - `audit` - WAN exposure scan and in-tunnel connectivity validation
//! - `tunnel` - Interface and handshake inspection through `ip` and `wg`
//! - `subprocess` - Subprocess abstraction layer for testing
//! - `config` - TOML configuration with environment overrides
//! - `error` - Unified error type with numeric codes
pub mod app;
pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod logs;
pub mod probe;
pub mod subprocess;
pub mod tunnel;
