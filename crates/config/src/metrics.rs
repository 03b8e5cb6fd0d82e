//! Metric definitions
//!
//! Each configured metric names a source type, the target namespace it is
//! written into, and raw source-specific settings. Source-specific parsing is
//! left to whoever builds the source from `RawMetricConfig::config`.
//!
//! # Example
//!
//! ```toml
//! [metrics.checkout_latency]
//! type = "datadog"
//! target_namespace = "shop-prod"
//! query = "avg:checkout.latency{*}"
//!
//! [metrics.queue_depth]
//! type = "influxdb"
//! target_namespace = "shop-prod"
//! enabled = false
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;

/// Container for all metric definitions
///
/// Keyed by metric name. Iteration order is the name order, which is the
/// order metrics are processed within a batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Named metric definitions
    #[serde(flatten)]
    metrics: BTreeMap<String, RawMetricConfig>,
}

impl MetricsConfig {
    /// Get a metric definition by name
    pub fn get(&self, name: &str) -> Option<&RawMetricConfig> {
        self.metrics.get(name)
    }

    /// Check if a metric is defined
    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    /// Iterate over all metric definitions
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawMetricConfig)> {
        self.metrics.iter()
    }

    /// Iterate over enabled metric definitions
    pub fn enabled(&self) -> impl Iterator<Item = (&String, &RawMetricConfig)> {
        self.metrics.iter().filter(|(_, m)| m.enabled)
    }

    /// Get the number of defined metrics
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Check if no metrics are defined
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Get all metric names
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.metrics.keys()
    }
}

/// Raw metric definition
#[derive(Debug, Clone, Deserialize)]
pub struct RawMetricConfig {
    /// Source type (e.g., "datadog", "influxdb")
    #[serde(rename = "type")]
    pub source_type: String,

    /// Target project/scope the metric is written into
    #[serde(default)]
    pub target_namespace: String,

    /// Whether this metric is synchronized
    /// Default: true
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Raw source-specific configuration
    #[serde(flatten)]
    pub config: toml::Value,
}

fn default_enabled() -> bool {
    true
}
