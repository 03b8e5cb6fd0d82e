//! Running metric updates as one batch
//!
//! A batch updates every configured metric once, with at most
//! `parallelism` updates in flight. Per-metric failures are captured in the
//! metrics' records; only unexpected errors reach the `BatchResult`.
//!
//! Batch-level stats are recorded after every update has settled:
//! the batch's total latency, then the age of the stalest metric.

use crate::error::BridgeError;
use crate::metric::Metric;
use crate::outcome::UpdateOutcome;
use crate::storage::Storage;
use crate::traits::TargetAdapter;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tsbridge_config::SyncConfig;
use tsbridge_stats::{Exporter, StatsCollector};

/// How a batch is run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum number of metric updates in flight
    ///
    /// Zero is treated as one.
    pub parallelism: usize,

    /// Cancel whatever is still running after this long
    pub timeout: Option<Duration>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallelism: 1,
            timeout: None,
        }
    }
}

impl From<&SyncConfig> for BatchOptions {
    fn from(config: &SyncConfig) -> Self {
        Self {
            parallelism: config.update_parallelism,
            timeout: config.update_timeout,
        }
    }
}

/// What a batch produced
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Errors that were not captured in a metric's status
    pub errors: Vec<BridgeError>,
    /// Updates that wrote new points
    pub succeeded: usize,
    /// Updates that found nothing new
    pub no_data: usize,
    /// Updates that failed, whether captured in a status or not
    pub failed: usize,
}

impl BatchResult {
    /// Whether the batch has no unexpected errors
    ///
    /// Failures captured in metric statuses do not count.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of updates run
    pub fn total(&self) -> usize {
        self.succeeded + self.no_data + self.failed
    }

    fn tally(&mut self, result: Result<UpdateOutcome, BridgeError>) {
        match result {
            Ok(UpdateOutcome::Success { .. }) => self.succeeded += 1,
            Ok(UpdateOutcome::NoData) => self.no_data += 1,
            Ok(_) => self.failed += 1,
            Err(e) => {
                self.failed += 1;
                self.errors.push(e);
            }
        }
    }
}

/// Runs metric updates against one target and records batch stats
pub struct BatchOrchestrator<'a> {
    target: &'a dyn TargetAdapter,
    stats: &'a StatsCollector,
    options: BatchOptions,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(target: &'a dyn TargetAdapter, stats: &'a StatsCollector) -> Self {
        Self {
            target,
            stats,
            options: BatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Update every metric once
    ///
    /// Cancelling `cancel` (or reaching the configured timeout) aborts the
    /// in-flight remote calls; the affected metrics report it in their
    /// status. Batch stats are recorded either way.
    pub async fn run(&self, metrics: &mut [Metric], cancel: &CancellationToken) -> BatchResult {
        let started = Instant::now();

        let mut result = BatchResult::default();
        for update in self.update_all(metrics, cancel).await {
            result.tally(update);
        }

        let elapsed = started.elapsed();
        self.stats.record_batch_latency(elapsed);

        let now = Utc::now();
        let oldest = metrics
            .iter()
            .map(|m| m.record().age(now))
            .max()
            .unwrap_or_default();
        self.stats.record_oldest_metric_age(oldest);

        info!(
            metrics = metrics.len(),
            succeeded = result.succeeded,
            no_data = result.no_data,
            failed = result.failed,
            errors = result.errors.len(),
            elapsed = ?elapsed,
            oldest_age = ?oldest,
            "batch complete"
        );

        result
    }

    async fn update_all(
        &self,
        metrics: &mut [Metric],
        cancel: &CancellationToken,
    ) -> Vec<Result<UpdateOutcome, BridgeError>> {
        let batch_cancel = cancel.child_token();
        let parallelism = self.options.parallelism.max(1);

        let work = stream::iter(metrics.iter_mut())
            .map(|metric| metric.update(self.target, self.stats, &batch_cancel))
            .buffer_unordered(parallelism)
            .collect::<Vec<_>>();
        tokio::pin!(work);

        let deadline = tokio::time::sleep(self.options.timeout.unwrap_or_default());
        tokio::pin!(deadline);
        let mut armed = self.options.timeout.is_some();

        loop {
            tokio::select! {
                results = &mut work => break results,
                _ = &mut deadline, if armed => {
                    warn!(
                        timeout = ?self.options.timeout,
                        "batch timed out, cancelling remaining updates"
                    );
                    batch_cancel.cancel();
                    armed = false;
                }
            }
        }
    }
}

/// Run one batch, persist every record and flush stats
///
/// Stats are flushed to `exporter` when this returns, however the batch
/// ended. A record that fails to save is reported in the result's errors;
/// the remaining records are still saved.
pub async fn run_batch(
    metrics: &mut [Metric],
    target: &dyn TargetAdapter,
    storage: &dyn Storage,
    stats: &StatsCollector,
    exporter: &dyn Exporter,
    options: BatchOptions,
    cancel: &CancellationToken,
) -> BatchResult {
    let _flush = stats.flush_on_drop(exporter);

    let mut result = BatchOrchestrator::new(target, stats)
        .with_options(options)
        .run(metrics, cancel)
        .await;

    for metric in metrics.iter() {
        if let Err(source) = storage.save(metric.record()).await {
            warn!(metric = %metric.name(), error = %source, "failed to save metric record");
            result.errors.push(BridgeError::Storage {
                metric: metric.name().to_string(),
                source,
            });
        }
    }

    result
}
