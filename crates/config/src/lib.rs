//! tsbridge Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty file is a valid configuration with no metrics.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use tsbridge_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[sync]\nupdate_parallelism = 2").unwrap();
//! assert_eq!(config.sync.update_parallelism, 2);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! filter = "info"
//!
//! [stats]
//! namespace = "ts_bridge"
//!
//! [sync]
//! update_parallelism = 1
//! update_timeout = "5m"
//!
//! [metrics.checkout_latency]
//! type = "datadog"
//! target_namespace = "shop-prod"
//! query = "avg:checkout.latency{*}"
//! ```

mod error;
mod logging;
mod metrics;
mod stats;
mod sync;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use logging::{DEFAULT_LOG_FILTER, LogConfig, LogFormat};
pub use metrics::{MetricsConfig, RawMetricConfig};
pub use stats::{DEFAULT_STATS_NAMESPACE, StatsConfig, StatsFormat};
pub use sync::SyncConfig;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Self-instrumentation settings
    pub stats: StatsConfig,

    /// Batch concurrency and deadline
    pub sync: SyncConfig,

    /// Metrics to synchronize
    pub metrics: MetricsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Names of metrics that take part in batches
    pub fn enabled_metrics(&self) -> Vec<&str> {
        self.metrics.enabled().map(|(name, _)| name.as_str()).collect()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.sync.update_parallelism, 1);
        assert_eq!(config.stats.namespace, "ts_bridge");
        assert!(config.metrics.is_empty());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[log]
filter = "debug"
format = "json"
file = "/var/log/tsbridge.log"

[stats]
namespace = "bridge"
format = "json"

[sync]
update_parallelism = 3
update_timeout = "2m"

[metrics.checkout_latency]
type = "datadog"
target_namespace = "shop-prod"
query = "avg:checkout.latency{*}"

[metrics.queue_depth]
type = "influxdb"
target_namespace = "shop-prod"
enabled = false
"#;
        let config = Config::from_str(toml).unwrap();

        assert_eq!(config.log.filter, "debug");
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(
            config.log.file.as_deref(),
            Some(Path::new("/var/log/tsbridge.log"))
        );
        assert_eq!(config.stats.namespace, "bridge");
        assert_eq!(config.sync.update_parallelism, 3);
        assert_eq!(config.sync.update_timeout, Some(Duration::from_secs(120)));
        assert_eq!(config.metrics.len(), 2);
        assert_eq!(config.enabled_metrics(), vec!["checkout_latency"]);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sync]\nupdate_parallelism = 2").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.sync.update_parallelism, 2);
    }

    #[test]
    fn test_from_missing_file() {
        let result = Config::from_file("/nonexistent/tsbridge.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
