//! Self-instrumentation configuration
//!
//! Controls how the bridge names and exports its own latency and staleness
//! measurements.
//!
//! # Defaults
//!
//! - `namespace`: `ts_bridge` (dashboards and alerts key on this prefix)
//! - `format`: human

use serde::Deserialize;

/// Default measurement namespace
pub const DEFAULT_STATS_NAMESPACE: &str = "ts_bridge";

/// Output format for the log exporter
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatsFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON structured output
    Json,
}

/// Stats configuration
///
/// # Example
///
/// ```toml
/// [stats]
/// namespace = "ts_bridge"
/// format = "json"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Prefix for every view name (`<namespace>/import_latencies`, ...)
    pub namespace: String,

    /// Output format used when exporting through logs
    pub format: StatsFormat,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_STATS_NAMESPACE.to_string(),
            format: StatsFormat::Human,
        }
    }
}
