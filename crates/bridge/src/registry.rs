//! Building the metric set from configuration
//!
//! Concrete source connectors plug in through `SourceFactory`. Metrics whose
//! source cannot be built are left out of the set and reported; the rest
//! still run.

use crate::error::BridgeError;
use crate::metric::Metric;
use crate::storage::Storage;
use crate::traits::SourceMetric;
use tracing::{debug, info, warn};
use tsbridge_config::{MetricsConfig, RawMetricConfig};

/// Builds sources from their configuration
pub trait SourceFactory: Send + Sync {
    /// Build the source for metric `name`
    ///
    /// Fails with `BridgeError::UnknownSourceType` when the configured type
    /// is not supported.
    fn build(
        &self,
        name: &str,
        config: &RawMetricConfig,
    ) -> Result<Box<dyn SourceMetric>, BridgeError>;
}

/// Build every enabled metric, loading its record from `storage`
///
/// Records of metrics that are no longer configured are removed from
/// storage. Returns the metrics that were built and the errors of those
/// that were not.
pub async fn build_metrics(
    config: &MetricsConfig,
    factory: &dyn SourceFactory,
    storage: &dyn Storage,
) -> (Vec<Metric>, Vec<BridgeError>) {
    let mut metrics = Vec::new();
    let mut errors = Vec::new();

    for (name, raw) in config.enabled() {
        match build_one(name, raw, factory, storage).await {
            Ok(metric) => {
                debug!(metric = %name, source_type = %raw.source_type, "metric built");
                metrics.push(metric);
            }
            Err(e) => {
                warn!(metric = %name, error = %e, "skipping metric");
                errors.push(e);
            }
        }
    }

    let keep: Vec<&str> = config.names().map(String::as_str).collect();
    match storage.cleanup(&keep).await {
        Ok(0) => {}
        Ok(removed) => info!(removed, "removed records of unconfigured metrics"),
        Err(e) => {
            warn!(error = %e, "failed to clean up metric records");
            errors.push(BridgeError::Cleanup(e));
        }
    }

    info!(
        built = metrics.len(),
        skipped = errors.len(),
        "metric set ready"
    );

    (metrics, errors)
}

async fn build_one(
    name: &str,
    raw: &RawMetricConfig,
    factory: &dyn SourceFactory,
    storage: &dyn Storage,
) -> Result<Metric, BridgeError> {
    let source = factory.build(name, raw)?;
    let record = storage
        .load(name)
        .await
        .map_err(|source| BridgeError::Storage {
            metric: name.to_string(),
            source,
        })?;
    Metric::new(name, source, raw.target_namespace.clone(), record)
}
