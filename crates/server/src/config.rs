use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Names a TOML file to load instead of the built-in defaults.
pub const CONFIG_ENV: &str = "REIMBURSE_CONFIG";
/// Overrides `bind_addr` from the file or defaults.
pub const BIND_ENV: &str = "REIMBURSE_BIND";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid bind address '{value}': {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    /// Bunyan-style JSON lines.
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
    pub body_limit_bytes: usize,
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            allowed_origins: vec!["*".to_string()],
            body_limit_bytes: 10 * 1024 * 1024,
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Defaults, or the file named by `REIMBURSE_CONFIG`, then env overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        config.with_bind_override(std::env::var(BIND_ENV).ok().as_deref())
    }

    pub fn with_bind_override(mut self, bind: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = bind {
            self.bind_addr = value.parse().map_err(|source| ConfigError::InvalidBind {
                value: value.to_string(),
                source,
            })?;
        }
        Ok(self)
    }
}
