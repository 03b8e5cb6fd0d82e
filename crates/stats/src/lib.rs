//! tsbridge - Stats
//!
//! Self-instrumentation for the sync pipeline: latency and staleness views,
//! a collector that aggregates measurements, and exporters that receive
//! them on flush.
//!
//! # Views
//!
//! | Name | Aggregation | Tag |
//! |---|---|---|
//! | `<ns>/metric_import_latencies` | distribution (ms) | `metric_name` |
//! | `<ns>/import_latencies` | distribution (ms) | none |
//! | `<ns>/oldest_metric_age` | last value (ms) | none |
//!
//! Names are consumed by dashboards and alerts, so they are fixed.
//!
//! # Flushing
//!
//! Measurements accumulate in the collector until `flush` hands them to an
//! `Exporter`. Wrap a batch in `flush_on_drop` so the flush happens however
//! the batch ends:
//!
//! ```
//! use tsbridge_stats::{LogExporter, StatsCollector};
//! use tsbridge_config::StatsFormat;
//! use std::time::Duration;
//!
//! let collector = StatsCollector::new("ts_bridge");
//! let exporter = LogExporter::new(StatsFormat::Human);
//! {
//!     let _flush = collector.flush_on_drop(&exporter);
//!     collector.record_batch_latency(Duration::from_millis(120));
//! } // flushed here
//! ```

mod aggregation;
mod collector;
mod error;
mod exporter;
pub mod format;
mod view;

pub use aggregation::{AggregationData, DistributionData, LastValueData};
pub use collector::{FlushGuard, StatsCollector};
pub use error::StatsError;
pub use exporter::{Exporter, LogExporter};
pub use format::{HumanFormatter, JsonFormatter, ViewFormatter};
pub use view::{
    Aggregation, IMPORT_LATENCIES, LATENCY_BOUNDS_MS, METRIC_IMPORT_LATENCIES, METRIC_NAME_TAG,
    OLDEST_METRIC_AGE, Row, Tag, View, ViewData, qualified,
};
