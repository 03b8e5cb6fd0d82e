//! `[log]` section: where the bridge's own log lines go

use serde::Deserialize;
use std::path::PathBuf;

/// Filter applied when `[log]` names none
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Line format of the bridge's own log
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Console,
    /// One JSON object per line, for log shippers
    Json,
}

/// Logging configuration
///
/// ```toml
/// [log]
/// filter = "info,tsbridge=debug"
/// format = "json"
/// file = "/var/log/tsbridge.log"
/// ```
///
/// Without `file`, lines go to stderr.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `warn` or `info,tsbridge=debug`
    pub filter: String,

    pub format: LogFormat,

    /// Append to this file instead of writing to stderr
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logs_info_to_stderr() {
        let config = LogConfig::default();
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Console);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
filter = "warn,tsbridge=debug"
format = "json"
file = "/var/log/tsbridge.log"
"#;
        let config: LogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.filter, "warn,tsbridge=debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("/var/log/tsbridge.log")));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: LogConfig = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(config.filter, DEFAULT_LOG_FILTER);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<LogConfig, _> = toml::from_str("level = \"debug\"");
        assert!(result.is_err());
    }
}
