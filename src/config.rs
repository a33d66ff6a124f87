//! Connection settings for the contacts service.
//!
//! Values come from, in priority order: command line flags, environment
//! variables, the TOML config file, and built-in defaults.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Environment variable names
const ENV_API_URL: &str = "CONTACTDIR_API_URL";
const ENV_TIMEOUT_SECS: &str = "CONTACTDIR_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{name} must be a positive whole number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

/// Shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Overrides given on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
}

impl Config {
    /// Resolve settings from the process environment.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |name| env::var(name).ok())
    }

    /// Resolve settings with an explicit environment lookup.
    pub fn resolve<F>(overrides: &ConfigOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // An explicit path must exist; the default location is optional
        let file = match &overrides.config_path {
            Some(path) => Some(read_file(path)?),
            None => match default_path() {
                Some(path) if path.exists() => Some(read_file(&path)?),
                _ => None,
            },
        };

        if let Some(file) = file {
            if let Some(url) = file.api_url {
                config.api_url = url;
            }
            if let Some(secs) = file.timeout_secs {
                config.timeout_secs = secs;
            }
        }

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_url = url;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            config.timeout_secs = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout {
                    name: ENV_TIMEOUT_SECS,
                    value: value.clone(),
                })?;
        }

        if let Some(url) = &overrides.api_url {
            config.api_url = url.clone();
        }

        // A zero timeout would fail every request immediately
        if config.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                name: "timeout_secs",
                value: "0".to_string(),
            });
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `<config dir>/contactdir/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("contactdir").join("config.toml"))
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
