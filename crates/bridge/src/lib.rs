//! tsbridge - Sync pipeline
//!
//! Copies time-series data from external metric sources into a monitoring
//! backend. Each metric keeps its own cursor, read back from the backend on
//! every run, so repeated runs only transfer new points.
//!
//! # Design Principles
//!
//! - **Never abort on one metric**: source, cursor and write failures are
//!   captured in the metric's status and the batch moves on
//! - **Backend is the source of truth**: the cursor is the newest timestamp
//!   already stored in the target, not local state
//! - **Bounded fan-out**: updates share the target's request quota, so at
//!   most `update_parallelism` run at once
//! - **Self-instrumented**: every update and batch is timed, and the age of
//!   the stalest metric is reported after each batch
//!
//! # Example
//!
//! ```ignore
//! use tsbridge::{BatchOptions, MemoryStorage, build_metrics, run_batch};
//! use tsbridge_config::Config;
//! use tsbridge_stats::{LogExporter, StatsCollector};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = Config::from_file("tsbridge.toml")?;
//! let storage = MemoryStorage::new();
//! let stats = StatsCollector::from_config(&config.stats);
//! let exporter = LogExporter::new(config.stats.format);
//!
//! let (mut metrics, errors) = build_metrics(&config.metrics, &factory, &storage).await;
//! let result = run_batch(
//!     &mut metrics,
//!     &target,
//!     &storage,
//!     &stats,
//!     &exporter,
//!     BatchOptions::from(&config.sync),
//!     &CancellationToken::new(),
//! )
//! .await;
//! ```

mod batch;
mod error;
mod logging;
mod metric;
mod outcome;
mod record;
mod registry;
mod storage;
mod traits;
pub mod types;

#[cfg(test)]
mod testing;

// Re-exports
pub use batch::{BatchOptions, BatchOrchestrator, BatchResult, run_batch};
pub use error::{BridgeError, SourceError, StorageError, TargetError};
pub use logging::init_logging;
pub use metric::Metric;
pub use outcome::UpdateOutcome;
pub use record::MetricRecord;
pub use registry::{SourceFactory, build_metrics};
pub use storage::{MemoryStorage, Storage};
pub use traits::{SourceMetric, TargetAdapter};
pub use types::{Delta, MetricDescriptor, MetricKind, Point, PointValue, TimeSeries, ValueType};
