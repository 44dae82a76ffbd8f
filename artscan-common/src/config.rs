//! Configuration loading and root folder resolution
//!
//! Resolution priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Optional settings from the artscan TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Root folder for stored uploads
    pub root_folder: Option<String>,
    /// Base URL of the remote scoring engine
    pub engine_url: Option<String>,
    /// Bounded wait for a single scoring call, in seconds
    pub scoring_timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Load the config file if present, empty config otherwise
    pub fn load() -> TomlConfig {
        let Ok(path) = config_file_path() else {
            return TomlConfig::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config file: {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed config file {}: {}", path.display(), e);
                    TomlConfig::default()
                }
            },
            Err(_) => TomlConfig::default(),
        }
    }
}

/// Resolve the root folder holding the upload store
pub fn resolve_root_folder(cli_arg: Option<&PathBuf>, toml_config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.clone();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("ARTSCAN_ROOT") {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(root) = &toml_config.root_folder {
        return PathBuf::from(root);
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Configuration file path for the platform
fn config_file_path() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // ~/.config/artscan/config.toml first, then /etc/artscan/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("artscan").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/artscan/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("artscan").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )))
        }
    }
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("artscan"))
        .unwrap_or_else(|| PathBuf::from("./artscan_data"))
}
