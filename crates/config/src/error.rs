//! Configuration errors
//!
//! Validation errors name the offending setting by its dotted TOML key,
//! e.g. `sync.update_parallelism` or `metrics.orders.target_namespace`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing required setting '{key}'")]
    Missing { key: String },

    #[error("invalid setting '{key}': {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Dotted key of the setting at fault, for validation errors
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Missing { key } | Self::Invalid { key, .. } => Some(key),
            Self::Read { .. } | Self::Parse(_) => None,
        }
    }
}
