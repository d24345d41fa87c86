use super::VpnWatchConfig;
use crate::error::{common, ErrorExt, Result, VpnWatchError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "vpnwatch.toml";

/// Configuration plus the file it came from, if any
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: VpnWatchConfig,
    pub source: Option<PathBuf>,
}

/// Per-user configuration file, e.g. `~/.config/vpnwatch/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("net", "vpnwatch", "vpnwatch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Locate, parse, env-merge and validate the configuration.
///
/// An explicit path must exist. Without one, `./vpnwatch.toml` and then the
/// per-user file are tried; if neither exists the defaults are used.
pub async fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let source = match explicit {
        Some(path) => {
            if !fs::try_exists(path).await.unwrap_or(false) {
                return Err(common::config_not_found(path));
            }
            Some(path.to_path_buf())
        }
        None => discover().await,
    };

    let mut config = match &source {
        Some(path) => read_config_file(path).await?,
        None => {
            debug!("No configuration file found, using defaults");
            VpnWatchConfig::default()
        }
    };

    config.merge_env_vars()?;
    config.validate().map_err(|e| match &source {
        Some(path) => e.with_path(path),
        None => e,
    })?;

    Ok(LoadedConfig { config, source })
}

async fn discover() -> Option<PathBuf> {
    let candidates = std::iter::once(PathBuf::from(CONFIG_FILE_NAME)).chain(default_config_path());
    for candidate in candidates {
        if fs::try_exists(&candidate).await.unwrap_or(false) {
            return Some(candidate);
        }
    }
    None
}

async fn read_config_file(path: &Path) -> Result<VpnWatchConfig> {
    debug!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(path)
        .await
        .to_config_error("Cannot read configuration file")
        .map_err(|e| e.with_path(path))?;
    toml::from_str(&content).map_err(|e| VpnWatchError::from(e).with_path(path))
}
