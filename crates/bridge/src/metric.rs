//! A bridged metric and its update algorithm
//!
//! One update moves a metric forward by at most one delta:
//!
//! ```text
//! target.latest_timestamp ──► source.fetch_delta(cursor) ──► target.write_delta
//!        │ err                        │ err / empty                 │ err / ok
//!        ▼                            ▼                             ▼
//!  TimestampError            FetchError / NoData          WriteError / Success
//! ```
//!
//! Every path ends in the metric's record and one latency measurement.
//! Remote failures stay in the record's status; nothing is retried within
//! the update.

use crate::error::{BridgeError, SourceError, TargetError};
use crate::outcome::UpdateOutcome;
use crate::record::MetricRecord;
use crate::traits::{SourceMetric, TargetAdapter};
use chrono::Utc;
use std::fmt;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tsbridge_stats::StatsCollector;

/// A metric bound to its source, its target namespace and its record
pub struct Metric {
    name: String,
    source: Box<dyn SourceMetric>,
    target_namespace: String,
    record: MetricRecord,
}

impl Metric {
    /// Bind a source to a target namespace
    ///
    /// The source's configuration is checked once here; a metric whose
    /// source rejects its configuration is never built.
    pub fn new(
        name: impl Into<String>,
        source: Box<dyn SourceMetric>,
        target_namespace: impl Into<String>,
        record: MetricRecord,
    ) -> Result<Self, BridgeError> {
        let name = name.into();
        source.query().map_err(|source| BridgeError::Source {
            metric: name.clone(),
            source,
        })?;

        Ok(Self {
            name,
            source,
            target_namespace: target_namespace.into(),
            record,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    /// Name of the metric in the target system
    pub fn target_name(&self) -> String {
        self.source.target_name()
    }

    pub fn record(&self) -> &MetricRecord {
        &self.record
    }

    /// Take the record back, e.g. to persist it
    pub fn into_record(self) -> MetricRecord {
        self.record
    }

    /// Synchronize new source data into the target
    ///
    /// Remote failures are reported through the returned outcome and the
    /// record's status; only unexpected errors are returned as `Err`. Those
    /// stamp `last_attempt` but leave `last_status` at its previous value.
    /// The elapsed time is recorded in `stats` on every path.
    ///
    /// Cancelling `cancel` aborts whichever remote call is in flight; it is
    /// reported as that call's failure.
    pub async fn update(
        &mut self,
        target: &dyn TargetAdapter,
        stats: &StatsCollector,
        cancel: &CancellationToken,
    ) -> Result<UpdateOutcome, BridgeError> {
        let started = Instant::now();
        let now = Utc::now();

        let result = self.sync(target, cancel).await;
        match &result {
            Ok(outcome) => {
                self.record.apply(outcome, now);
                self.log_outcome(outcome);
            }
            Err(e) => {
                self.record.touch(now);
                warn!(metric = %self.name, error = %e, "metric update failed unexpectedly");
            }
        }

        stats.record_metric_latency(&self.name, started.elapsed());
        result
    }

    async fn sync(
        &self,
        target: &dyn TargetAdapter,
        cancel: &CancellationToken,
    ) -> Result<UpdateOutcome, BridgeError> {
        let target_name = self.source.target_name();
        if target_name.trim().is_empty() {
            return Err(BridgeError::EmptyTargetName(self.name.clone()));
        }

        let latest = match cancel
            .run_until_cancelled(target.latest_timestamp(&self.target_namespace, &target_name))
            .await
            .unwrap_or(Err(TargetError::Cancelled))
        {
            Ok(ts) => ts,
            Err(e) => return Ok(UpdateOutcome::TimestampError(e.to_string())),
        };

        let delta = match cancel
            .run_until_cancelled(self.source.fetch_delta(latest))
            .await
            .unwrap_or(Err(SourceError::Cancelled))
        {
            Ok(delta) => delta,
            Err(e) => return Ok(UpdateOutcome::FetchError(e.to_string())),
        };

        if delta.is_empty() {
            return Ok(UpdateOutcome::NoData);
        }

        debug!(
            metric = %self.name,
            since = %latest,
            newest = ?delta.newest(),
            points = delta.len(),
            "writing new points"
        );

        let written = cancel
            .run_until_cancelled(target.write_delta(
                &self.target_namespace,
                &target_name,
                &delta.descriptor,
                &delta.points,
            ))
            .await
            .unwrap_or(Err(TargetError::Cancelled));

        Ok(match written {
            Ok(()) => UpdateOutcome::Success {
                points: delta.len(),
            },
            Err(e) => UpdateOutcome::WriteError(e.to_string()),
        })
    }

    fn log_outcome(&self, outcome: &UpdateOutcome) {
        if outcome.is_failure() {
            warn!(
                metric = %self.name,
                namespace = %self.target_namespace,
                status = %outcome,
                "metric update failed"
            );
        } else {
            debug!(
                metric = %self.name,
                namespace = %self.target_namespace,
                status = %outcome,
                "metric updated"
            );
        }
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metric")
            .field("name", &self.name)
            .field("target_namespace", &self.target_namespace)
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}
