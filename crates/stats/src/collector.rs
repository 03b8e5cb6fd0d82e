//! Stats collector
//!
//! Holds the registered views and their aggregated rows. One collector is
//! built at process start and shared by reference with every batch run.

use crate::aggregation::AggregationData;
use crate::error::StatsError;
use crate::exporter::Exporter;
use crate::view::{
    IMPORT_LATENCIES, METRIC_IMPORT_LATENCIES, OLDEST_METRIC_AGE, Row, Tag, View, ViewData,
    qualified,
};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, trace};
use tsbridge_config::StatsConfig;

struct ViewState {
    view: View,
    /// Keyed by tag values, in `view.tag_keys` order
    rows: BTreeMap<Vec<String>, AggregationData>,
}

impl ViewState {
    fn new(view: View) -> Self {
        Self {
            view,
            rows: BTreeMap::new(),
        }
    }

    fn data(&self) -> ViewData {
        let rows = self
            .rows
            .iter()
            .map(|(values, data)| Row {
                tags: self
                    .view
                    .tag_keys
                    .iter()
                    .zip(values)
                    .map(|(key, value)| Tag {
                        key: *key,
                        value: value.clone(),
                    })
                    .collect(),
                data: data.clone(),
            })
            .collect();

        ViewData {
            view: self.view.clone(),
            rows,
        }
    }
}

/// Registry and recorder for the bridge's own latency and staleness views
///
/// Safe to share across concurrently running metric updates.
pub struct StatsCollector {
    namespace: String,
    views: Mutex<Vec<ViewState>>,
}

impl StatsCollector {
    /// Create a collector with the built-in views registered under `namespace`
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let views = View::builtin(&namespace)
            .into_iter()
            .map(ViewState::new)
            .collect();

        debug!(namespace = %namespace, "stats views registered");

        Self {
            namespace,
            views: Mutex::new(views),
        }
    }

    /// Create a collector from configuration
    pub fn from_config(config: &StatsConfig) -> Self {
        Self::new(config.namespace.clone())
    }

    /// Namespace prefixed to every view name
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register the built-in views again
    ///
    /// A no-op for views that are already present, so calling it any number
    /// of times leaves exactly one copy of each view.
    pub fn register_views(&self) -> Result<(), StatsError> {
        for view in View::builtin(&self.namespace) {
            self.register_view(view)?;
        }
        Ok(())
    }

    /// Register a view
    ///
    /// Registering an identical view twice is a no-op. Registering a
    /// different view under an existing name fails.
    pub fn register_view(&self, view: View) -> Result<(), StatsError> {
        if view.name.trim().is_empty() {
            return Err(StatsError::InvalidName(view.name));
        }

        let mut views = self.views.lock();
        match views.iter().find(|s| s.view.name == view.name) {
            Some(existing) if existing.view == view => Ok(()),
            Some(_) => Err(StatsError::ViewConflict(view.name)),
            None => {
                views.push(ViewState::new(view));
                Ok(())
            }
        }
    }

    /// Record how long one metric's update took, on every outcome
    pub fn record_metric_latency(&self, metric: &str, latency: Duration) {
        let name = qualified(&self.namespace, METRIC_IMPORT_LATENCIES);
        self.record(&name, &[metric], millis(latency));
    }

    /// Record how long a whole batch took
    pub fn record_batch_latency(&self, latency: Duration) {
        let name = qualified(&self.namespace, IMPORT_LATENCIES);
        self.record(&name, &[], millis(latency));
    }

    /// Record the age of the least recently updated metric
    pub fn record_oldest_metric_age(&self, age: Duration) {
        let name = qualified(&self.namespace, OLDEST_METRIC_AGE);
        self.record(&name, &[], millis(age));
    }

    fn record(&self, view_name: &str, tag_values: &[&str], value: f64) {
        let mut views = self.views.lock();
        let Some(state) = views.iter_mut().find(|s| s.view.name == view_name) else {
            debug!(view = view_name, "dropping measurement for unregistered view");
            return;
        };

        if state.view.tag_keys.len() != tag_values.len() {
            debug!(
                view = view_name,
                expected = state.view.tag_keys.len(),
                got = tag_values.len(),
                "dropping measurement with mismatched tags"
            );
            return;
        }

        let key = tag_values.iter().map(|v| v.to_string()).collect();
        let aggregation = &state.view.aggregation;
        state
            .rows
            .entry(key)
            .or_insert_with(|| aggregation.new_data())
            .add(value);

        trace!(view = view_name, value, "measurement recorded");
    }

    /// Current data for one view
    pub fn view_data(&self, view_name: &str) -> Option<ViewData> {
        self.views
            .lock()
            .iter()
            .find(|s| s.view.name == view_name)
            .map(ViewState::data)
    }

    /// Current data for every registered view, in registration order
    pub fn snapshot(&self) -> Vec<ViewData> {
        self.views.lock().iter().map(ViewState::data).collect()
    }

    /// Export every view, then flush the exporter
    ///
    /// Returns only after `exporter.flush()` has returned.
    pub fn flush(&self, exporter: &dyn Exporter) {
        let snapshot = self.snapshot();
        for data in &snapshot {
            exporter.export_view(data);
        }
        exporter.flush();
        debug!(views = snapshot.len(), "stats flushed");
    }

    /// Flush to `exporter` when the returned guard goes out of scope
    ///
    /// Holding the guard for the duration of a batch guarantees the flush
    /// runs on every exit path, including early returns and panics.
    pub fn flush_on_drop<'a>(&'a self, exporter: &'a dyn Exporter) -> FlushGuard<'a> {
        FlushGuard {
            collector: self,
            exporter,
        }
    }
}

/// Flushes a collector when dropped
#[must_use = "the flush happens when the guard is dropped"]
pub struct FlushGuard<'a> {
    collector: &'a StatsCollector,
    exporter: &'a dyn Exporter,
}

impl FlushGuard<'_> {
    /// The guarded collector
    pub fn collector(&self) -> &StatsCollector {
        self.collector
    }
}

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        self.collector.flush(self.exporter);
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
