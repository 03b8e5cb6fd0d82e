//! Hand-written fakes for the pipeline traits, used by unit tests

use crate::error::{SourceError, StorageError, TargetError};
use crate::record::MetricRecord;
use crate::storage::Storage;
use crate::traits::{SourceMetric, TargetAdapter};
use crate::types::{Delta, MetricDescriptor, Point, PointValue, TimeSeries};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tsbridge_stats::{Exporter, ViewData};

/// A delta with `n` single-point series ending at `end_time`
pub fn delta_with(n: usize, end_time: DateTime<Utc>) -> Delta {
    let series = (0..n)
        .map(|i| TimeSeries {
            metric_type: "custom/fake".into(),
            points: vec![Point {
                start_time: None,
                end_time,
                value: PointValue::Int64(i as i64),
            }],
            ..Default::default()
        })
        .collect();

    Delta {
        descriptor: MetricDescriptor {
            metric_type: "custom/fake".into(),
            ..Default::default()
        },
        points: series,
    }
}

#[derive(Default)]
struct SourceState {
    delta: Option<Result<Delta, SourceError>>,
    query_error: Option<SourceError>,
    delay: Duration,
    seen_since: Vec<DateTime<Utc>>,
}

/// Source returning a fixed delta; clones share state
#[derive(Clone)]
pub struct FakeSource {
    target_name: String,
    state: Arc<Mutex<SourceState>>,
}

impl FakeSource {
    pub fn new(target_name: &str) -> Self {
        Self {
            target_name: target_name.into(),
            state: Arc::default(),
        }
    }

    pub fn returning(self, delta: Result<Delta, SourceError>) -> Self {
        self.state.lock().delta = Some(delta);
        self
    }

    pub fn rejecting_query(self, error: SourceError) -> Self {
        self.state.lock().query_error = Some(error);
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().delay = delay;
        self
    }

    pub fn boxed(&self) -> Box<dyn SourceMetric> {
        Box::new(self.clone())
    }

    /// Every `since` value passed to `fetch_delta`
    pub fn seen_since(&self) -> Vec<DateTime<Utc>> {
        self.state.lock().seen_since.clone()
    }
}

#[async_trait]
impl SourceMetric for FakeSource {
    fn query(&self) -> Result<(), SourceError> {
        match &self.state.lock().query_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn target_name(&self) -> String {
        self.target_name.clone()
    }

    async fn fetch_delta(&self, since: DateTime<Utc>) -> Result<Delta, SourceError> {
        let (delay, delta) = {
            let mut state = self.state.lock();
            state.seen_since.push(since);
            (state.delay, state.delta.clone())
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        delta.unwrap_or_else(|| Ok(Delta::empty()))
    }
}

/// One recorded `write_delta` call
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub namespace: String,
    pub metric_name: String,
    pub points: usize,
}

struct TargetState {
    latest: Result<DateTime<Utc>, TargetError>,
    timestamp_delay: Duration,
    write_error: Option<TargetError>,
    timestamp_calls: usize,
    writes: Vec<Write>,
}

/// Target with a fixed cursor that records writes; clones share state
#[derive(Clone)]
pub struct FakeTarget {
    state: Arc<Mutex<TargetState>>,
}

impl FakeTarget {
    pub fn new(latest: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(Mutex::new(TargetState {
                latest: Ok(latest),
                timestamp_delay: Duration::ZERO,
                write_error: None,
                timestamp_calls: 0,
                writes: Vec::new(),
            })),
        }
    }

    pub fn failing_timestamp(self, error: TargetError) -> Self {
        self.state.lock().latest = Err(error);
        self
    }

    /// Make every cursor read take `delay`
    pub fn with_timestamp_delay(self, delay: Duration) -> Self {
        self.state.lock().timestamp_delay = delay;
        self
    }

    pub fn failing_write(self, error: TargetError) -> Self {
        self.state.lock().write_error = Some(error);
        self
    }

    pub fn timestamp_calls(&self) -> usize {
        self.state.lock().timestamp_calls
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state.lock().writes.clone()
    }
}

#[async_trait]
impl TargetAdapter for FakeTarget {
    async fn latest_timestamp(
        &self,
        _namespace: &str,
        _metric_name: &str,
    ) -> Result<DateTime<Utc>, TargetError> {
        let (delay, latest) = {
            let mut state = self.state.lock();
            state.timestamp_calls += 1;
            (state.timestamp_delay, state.latest.clone())
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        latest
    }

    async fn write_delta(
        &self,
        namespace: &str,
        metric_name: &str,
        _descriptor: &MetricDescriptor,
        points: &[TimeSeries],
    ) -> Result<(), TargetError> {
        let mut state = self.state.lock();
        if let Some(e) = &state.write_error {
            return Err(e.clone());
        }
        state.writes.push(Write {
            namespace: namespace.into(),
            metric_name: metric_name.into(),
            points: points.len(),
        });
        Ok(())
    }
}

/// Exporter that keeps every exported view
#[derive(Default)]
pub struct RecordingExporter {
    pub views: Mutex<Vec<ViewData>>,
    pub flushes: Mutex<u32>,
}

impl Exporter for RecordingExporter {
    fn export_view(&self, data: &ViewData) {
        self.views.lock().push(data.clone());
    }

    fn flush(&self) {
        *self.flushes.lock() += 1;
    }
}

/// Storage whose saves fail for the listed names
pub struct FailingStorage {
    pub failing: Vec<String>,
    pub saved: Mutex<Vec<MetricRecord>>,
}

impl FailingStorage {
    pub fn new(failing: &[&str]) -> Self {
        Self {
            failing: failing.iter().map(|s| s.to_string()).collect(),
            saved: Mutex::default(),
        }
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn load(&self, name: &str) -> Result<MetricRecord, StorageError> {
        Ok(MetricRecord::new(name))
    }

    async fn save(&self, record: &MetricRecord) -> Result<(), StorageError> {
        if self.failing.contains(&record.name) {
            return Err(StorageError::Backend("disk full".into()));
        }
        self.saved.lock().push(record.clone());
        Ok(())
    }

    async fn cleanup(&self, _keep: &[&str]) -> Result<usize, StorageError> {
        Ok(0)
    }
}
