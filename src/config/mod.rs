//! Static configuration for the log, scan and tunnel checks
//!
//! Layering, lowest to highest precedence: built-in defaults, a TOML file,
//! `VPNWATCH_*` environment variables, then command-line flags (applied by the
//! CLI layer).

use crate::error::{common, ErrorCode, Result, VpnWatchError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

pub mod loader;

pub use loader::{default_config_path, load_config, LoadedConfig, CONFIG_FILE_NAME};

/// A port and the service name shown next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortEntry {
    pub port: u16,
    pub label: String,
}

impl PortEntry {
    pub fn new(port: u16, label: impl Into<String>) -> Self {
        Self {
            port,
            label: label.into(),
        }
    }
}

/// A named service reachable (or not) through the tunnel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VpnWatchConfig {
    pub logs: LogsConfig,
    pub scan: ScanConfig,
    pub tunnel: TunnelConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Log file analyzed when none is given on the command line
    pub file: PathBuf,
    /// Events and errors retained for the report
    pub recent_limit: usize,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("/var/log/wireguard.log"),
            recent_limit: crate::logs::DEFAULT_RECENT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// WAN address or DDNS name to scan; required by `scan`
    pub target: Option<String>,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub concurrency: usize,
    /// Also fail the scan when an expected-open port is not reachable
    pub require_open: bool,
    /// Ports that must not be reachable from outside
    pub closed_ports: Vec<PortEntry>,
    /// Ports that should be reachable from outside
    pub open_ports: Vec<PortEntry>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: None,
            timeout: Duration::from_secs(3),
            concurrency: 8,
            require_open: false,
            closed_ports: default_management_ports(),
            open_ports: vec![PortEntry::new(51820, "WireGuard VPN")],
        }
    }
}

fn default_management_ports() -> Vec<PortEntry> {
    vec![
        PortEntry::new(22, "SSH"),
        PortEntry::new(80, "HTTP"),
        PortEntry::new(443, "HTTPS"),
        PortEntry::new(8006, "Proxmox"),
        PortEntry::new(8080, "HTTP Alt"),
        PortEntry::new(8443, "HTTPS Alt"),
        PortEntry::new(10443, "OPNsense GUI"),
        PortEntry::new(3389, "RDP"),
        PortEntry::new(5900, "VNC"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelConfig {
    pub interface: String,
    /// Limit for each `ip`/`wg` invocation
    #[serde(with = "humantime_serde")]
    pub tool_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub probe_timeout: Duration,
    pub concurrency: usize,
    /// Services that must be reachable through the tunnel
    pub authorized: Vec<ServiceEntry>,
    /// Services that must be blocked through the tunnel
    pub unauthorized: Vec<ServiceEntry>,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            interface: "wg0".to_string(),
            tool_timeout: Duration::from_secs(5),
            probe_timeout: Duration::from_secs(3),
            concurrency: 8,
            authorized: Vec::new(),
            unauthorized: Vec::new(),
        }
    }
}

impl VpnWatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `VPNWATCH_*` overrides from the process environment
    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(file) = lookup("VPNWATCH_LOG_FILE") {
            self.logs.file = PathBuf::from(file);
        }

        if let Some(target) = lookup("VPNWATCH_TARGET") {
            self.scan.target = Some(target);
        }

        if let Some(interface) = lookup("VPNWATCH_INTERFACE") {
            self.tunnel.interface = interface;
        }

        if let Some(timeout) = lookup("VPNWATCH_PROBE_TIMEOUT") {
            let timeout = humantime_serde::re::humantime::parse_duration(&timeout).map_err(|e| {
                common::invalid_value("VPNWATCH_PROBE_TIMEOUT", "is not a duration").with_source(e)
            })?;
            self.scan.timeout = timeout;
            self.tunnel.probe_timeout = timeout;
        }

        Ok(())
    }

    /// The scan target, or an error explaining how to set it
    pub fn require_target(&self) -> Result<&str> {
        match self.scan.target.as_deref() {
            Some(target) if !target.trim().is_empty() => Ok(target),
            _ => Err(common::missing_field(
                "scan.target",
                "set it in the config file, VPNWATCH_TARGET or --target",
            )),
        }
    }

    /// Reject values the checks cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.logs.recent_limit < crate::logs::DISPLAY_LIMIT {
            return Err(common::invalid_value(
                "logs.recent_limit",
                format!("must be at least {}", crate::logs::DISPLAY_LIMIT),
            ));
        }
        if self.scan.timeout.is_zero() {
            return Err(common::invalid_value("scan.timeout", "must be greater than 0"));
        }
        if self.scan.concurrency == 0 {
            return Err(common::invalid_value("scan.concurrency", "must be at least 1"));
        }
        if self.tunnel.tool_timeout.is_zero() {
            return Err(common::invalid_value("tunnel.tool_timeout", "must be greater than 0"));
        }
        if self.tunnel.probe_timeout.is_zero() {
            return Err(common::invalid_value("tunnel.probe_timeout", "must be greater than 0"));
        }
        if self.tunnel.concurrency == 0 {
            return Err(common::invalid_value("tunnel.concurrency", "must be at least 1"));
        }
        if self.tunnel.interface.trim().is_empty() {
            return Err(common::invalid_value("tunnel.interface", "must not be empty"));
        }

        let mut seen = HashSet::new();
        for (table, entries) in [
            ("scan.closed_ports", &self.scan.closed_ports),
            ("scan.open_ports", &self.scan.open_ports),
        ] {
            for entry in entries {
                if entry.port == 0 {
                    return Err(common::invalid_value(table, "contains port 0"));
                }
                if !seen.insert(entry.port) {
                    return Err(VpnWatchError::config_with_code(
                        ErrorCode::CONFIG_DUPLICATE_PORT,
                        format!("port {} is declared more than once ({})", entry.port, table),
                        None,
                    ));
                }
            }
        }

        for (table, services) in [
            ("tunnel.authorized", &self.tunnel.authorized),
            ("tunnel.unauthorized", &self.tunnel.unauthorized),
        ] {
            for service in services {
                if service.port == 0 || service.host.trim().is_empty() {
                    return Err(common::invalid_value(
                        table,
                        format!("entry '{}' needs a host and a non-zero port", service.name),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_management_ports() {
        let config = VpnWatchConfig::default();
        let ports: Vec<u16> = config.scan.closed_ports.iter().map(|p| p.port).collect();
        assert_eq!(ports, vec![22, 80, 443, 8006, 8080, 8443, 10443, 3389, 5900]);
        assert_eq!(config.scan.open_ports, vec![PortEntry::new(51820, "WireGuard VPN")]);
        assert_eq!(config.tunnel.interface, "wg0");
        assert_eq!(config.logs.recent_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: VpnWatchConfig = toml::from_str(
            r#"
            [scan]
            target = "vpn.example.net"
            timeout = "500ms"

            [[scan.open_ports]]
            port = 51820
            label = "WireGuard"
            "#,
        )
        .unwrap();

        assert_eq!(config.scan.target.as_deref(), Some("vpn.example.net"));
        assert_eq!(config.scan.timeout, Duration::from_millis(500));
        assert_eq!(config.scan.closed_ports.len(), 9);
        assert_eq!(config.scan.open_ports[0].label, "WireGuard");
        assert_eq!(config.logs, LogsConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("VPNWATCH_LOG_FILE", "/tmp/wg.log"),
            ("VPNWATCH_TARGET", "203.0.113.7"),
            ("VPNWATCH_INTERFACE", "wg1"),
            ("VPNWATCH_PROBE_TIMEOUT", "750ms"),
        ]
        .into_iter()
        .collect();

        let mut config = VpnWatchConfig::default();
        config
            .merge_env_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.logs.file, PathBuf::from("/tmp/wg.log"));
        assert_eq!(config.require_target().unwrap(), "203.0.113.7");
        assert_eq!(config.tunnel.interface, "wg1");
        assert_eq!(config.scan.timeout, Duration::from_millis(750));
        assert_eq!(config.tunnel.probe_timeout, Duration::from_millis(750));
    }

    #[test]
    fn test_bad_env_duration_is_config_error() {
        let mut config = VpnWatchConfig::default();
        let err = config
            .merge_env_from(|key| (key == "VPNWATCH_PROBE_TIMEOUT").then(|| "soon".to_string()))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
    }

    #[test]
    fn test_missing_target() {
        let config = VpnWatchConfig::default();
        let err = config.require_target().unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_MISSING_REQUIRED);

        let mut config = VpnWatchConfig::default();
        config.scan.target = Some("   ".to_string());
        assert!(config.require_target().is_err());
    }

    #[test]
    fn test_validation_rejects_duplicates_across_tables() {
        let mut config = VpnWatchConfig::default();
        config.scan.open_ports.push(PortEntry::new(22, "SSH again"));
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_DUPLICATE_PORT);
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let mut config = VpnWatchConfig::default();
        config.scan.concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = VpnWatchConfig::default();
        config.logs.recent_limit = 0;
        assert!(config.validate().is_err());

        let mut config = VpnWatchConfig::default();
        config.logs.recent_limit = 3;
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
        assert!(err.user_message().contains("must be at least 10"));

        let mut config = VpnWatchConfig::default();
        config.scan.timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = VpnWatchConfig::default();
        config.tunnel.unauthorized.push(ServiceEntry {
            name: "Firewall SSH".to_string(),
            host: "10.0.0.1".to_string(),
            port: 0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = VpnWatchConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("timeout = \"3s\""));
        let parsed: VpnWatchConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
