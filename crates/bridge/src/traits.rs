//! Capabilities the pipeline is built on
//!
//! A `SourceMetric` exists per external data source; a `TargetAdapter` wraps
//! the monitoring backend. Neither is implemented here. Cancellation is by
//! drop: when a batch is cancelled the in-flight future is dropped, so
//! implementations must not rely on running to completion.

use crate::error::{SourceError, TargetError};
use crate::types::{Delta, MetricDescriptor, TimeSeries};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A metric in an external source that can be read incrementally
#[async_trait]
pub trait SourceMetric: Send + Sync {
    /// Validate or refresh source-side configuration (e.g. resolve a query)
    fn query(&self) -> Result<(), SourceError>;

    /// Name of this metric in the target system
    ///
    /// Must be deterministic: the cursor is looked up under this name.
    fn target_name(&self) -> String;

    /// Descriptor plus all points strictly newer than `since`
    ///
    /// An empty delta is the normal "nothing new" result.
    async fn fetch_delta(&self, since: DateTime<Utc>) -> Result<Delta, SourceError>;
}

/// The monitoring backend data is written into
///
/// Shared by every update in a batch, so it must be safe for concurrent use.
#[async_trait]
pub trait TargetAdapter: Send + Sync {
    /// Timestamp of the newest point already stored for the metric
    ///
    /// Returns the Unix epoch when the metric has never been written.
    async fn latest_timestamp(
        &self,
        namespace: &str,
        metric_name: &str,
    ) -> Result<DateTime<Utc>, TargetError>;

    /// Append points for the metric, creating it from `descriptor` if needed
    ///
    /// Writing the same points twice must not duplicate them.
    async fn write_delta(
        &self,
        namespace: &str,
        metric_name: &str,
        descriptor: &MetricDescriptor,
        points: &[TimeSeries],
    ) -> Result<(), TargetError>;
}
