use std::path::PathBuf;

use thiserror::Error;

/// Startup configuration failures. These are fatal for the owning process.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config key `{key}` must be a positive finite number, found {value}")]
    NonPositive { key: &'static str, value: f64 },
}

impl ConfigError {
    /// Dotted config key the error refers to, when known.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            ConfigError::NonPositive { key, .. } => Some(key),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
