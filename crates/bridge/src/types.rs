//! Time-series data carried from a source to the target

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How values of a metric relate over time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Instantaneous measurement
    #[default]
    Gauge,
    /// Change since the previous point
    Delta,
    /// Running total since a start time
    Cumulative,
}

/// Type of each point's value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Bool,
    Int64,
    #[default]
    Double,
}

/// Schema of a metric in the target system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    /// Target metric type name
    pub metric_type: String,
    pub description: String,
    pub kind: MetricKind,
    pub value_type: ValueType,
    pub unit: String,
    pub label_keys: Vec<String>,
}

/// A single value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointValue {
    Bool(bool),
    Int64(i64),
    Double(f64),
}

/// A timestamped value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Start of the interval, for delta and cumulative kinds
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    pub value: PointValue,
}

/// One labelled series of points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub metric_type: String,
    pub labels: BTreeMap<String, String>,
    pub value_type: ValueType,
    pub points: Vec<Point>,
}

impl TimeSeries {
    /// Newest point end time in this series
    pub fn newest(&self) -> Option<DateTime<Utc>> {
        self.points.iter().map(|p| p.end_time).max()
    }
}

/// Data a source returns for one fetch: the schema plus everything newer
/// than the cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    pub descriptor: MetricDescriptor,
    pub points: Vec<TimeSeries>,
}

impl Delta {
    /// A delta with nothing new
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of new entries, as reported in a metric's status
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Newest point end time across all series
    pub fn newest(&self) -> Option<DateTime<Utc>> {
        self.points.iter().filter_map(TimeSeries::newest).max()
    }
}
