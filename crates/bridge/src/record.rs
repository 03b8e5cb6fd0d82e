//! Per-metric synchronization record
//!
//! The record is the only state kept between runs. The cursor itself is
//! not stored: it is read back from the target on every update.

use crate::outcome::UpdateOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Status and timestamps of a metric's most recent update
///
/// `last_attempt >= last_update` always holds after an update, and neither
/// timestamp moves backwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub name: String,
    /// Most recent update attempt, whatever its outcome
    pub last_attempt: DateTime<Utc>,
    /// Most recent attempt that wrote new data
    pub last_update: DateTime<Utc>,
    pub last_status: String,
}

impl MetricRecord {
    /// A record for a metric that has never been updated
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_attempt: DateTime::<Utc>::UNIX_EPOCH,
            last_update: DateTime::<Utc>::UNIX_EPOCH,
            last_status: String::new(),
        }
    }

    /// Apply the outcome of an attempt started at `at`
    pub fn apply(&mut self, outcome: &UpdateOutcome, at: DateTime<Utc>) {
        self.mark_attempt(outcome.to_string(), at);
        if outcome.advances_cursor() {
            self.last_update = self.last_update.max(at);
        }
    }

    /// Note an attempt without moving `last_update`
    pub fn mark_attempt(&mut self, status: impl Into<String>, at: DateTime<Utc>) {
        self.touch(at);
        self.last_status = status.into();
    }

    /// Note an attempt that produced no status of its own
    ///
    /// `last_status` keeps the outcome of the previous completed attempt.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_attempt = self.last_attempt.max(at).max(self.last_update);
    }

    /// Time since the metric last received new data
    ///
    /// A metric that never received data reports its age since the epoch.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.last_update).to_std().unwrap_or_default()
    }

    /// Whether the metric has ever been written
    pub fn has_updated(&self) -> bool {
        self.last_update > DateTime::<Utc>::UNIX_EPOCH
    }
}
