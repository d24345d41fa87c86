//! `vpnwatch config`: show the configuration every other command would use

use crate::config::VpnWatchConfig;
use crate::error::ErrorExt;
use anyhow::Result;
use std::path::Path;

pub fn run_config_command(config: &VpnWatchConfig, source: Option<&Path>) -> Result<i32> {
    match source {
        Some(path) => println!("# Loaded from {}", path.display()),
        None => println!("# Built-in defaults (no configuration file found)"),
    }
    print!("{}", render_config(config)?);
    Ok(0)
}

fn render_config(config: &VpnWatchConfig) -> crate::error::Result<String> {
    toml::to_string_pretty(config).to_vpnwatch("Failed to serialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rendered_config_parses_back() {
        let mut config = VpnWatchConfig::default();
        config.scan.target = Some("vpn.example.net".to_string());

        let text = render_config(&config).unwrap();
        assert!(text.contains("timeout = \"3s\""));

        let parsed: VpnWatchConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.tunnel.tool_timeout, Duration::from_secs(5));
    }
}
