//! View definitions and exported view data

use crate::aggregation::{AggregationData, DistributionData, LastValueData};
use serde::Serialize;

/// Tag key carrying the bridged metric's name
pub const METRIC_NAME_TAG: &str = "metric_name";

/// Per-metric import latency (distribution, tagged by metric name)
pub const METRIC_IMPORT_LATENCIES: &str = "metric_import_latencies";

/// Whole-batch import latency (distribution, untagged)
pub const IMPORT_LATENCIES: &str = "import_latencies";

/// Age of the least recently updated metric (last value, untagged)
pub const OLDEST_METRIC_AGE: &str = "oldest_metric_age";

/// Latency bucket boundaries in milliseconds
pub const LATENCY_BOUNDS_MS: &[f64] = &[
    0.0, 100.0, 250.0, 500.0, 1_000.0, 2_500.0, 5_000.0, 10_000.0, 30_000.0, 60_000.0,
    120_000.0, 300_000.0,
];

/// How a view folds measurements
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Aggregation {
    /// Distribution over the given bucket boundaries
    Distribution { bounds: Vec<f64> },
    /// Keep only the last value
    LastValue,
}

impl Aggregation {
    pub(crate) fn new_data(&self) -> AggregationData {
        match self {
            Self::Distribution { bounds } => {
                AggregationData::Distribution(DistributionData::new(bounds))
            }
            Self::LastValue => AggregationData::LastValue(LastValueData { value: 0.0 }),
        }
    }
}

/// A named, aggregated measurement exposed to exporters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    /// Fully qualified name (`<namespace>/<measure>`)
    pub name: String,
    pub description: String,
    pub unit: &'static str,
    /// Tag keys, in the order tag values are supplied when recording
    pub tag_keys: Vec<&'static str>,
    pub aggregation: Aggregation,
}

impl View {
    /// The three views every bridge deployment exposes, under `namespace`
    pub fn builtin(namespace: &str) -> Vec<View> {
        vec![
            View {
                name: qualified(namespace, METRIC_IMPORT_LATENCIES),
                description: "Import latency for a single metric".into(),
                unit: "ms",
                tag_keys: vec![METRIC_NAME_TAG],
                aggregation: Aggregation::Distribution {
                    bounds: LATENCY_BOUNDS_MS.to_vec(),
                },
            },
            View {
                name: qualified(namespace, IMPORT_LATENCIES),
                description: "Total import latency for all metrics".into(),
                unit: "ms",
                tag_keys: Vec::new(),
                aggregation: Aggregation::Distribution {
                    bounds: LATENCY_BOUNDS_MS.to_vec(),
                },
            },
            View {
                name: qualified(namespace, OLDEST_METRIC_AGE),
                description: "Time since the least recently updated metric received new data"
                    .into(),
                unit: "ms",
                tag_keys: Vec::new(),
                aggregation: Aggregation::LastValue,
            },
        ]
    }
}

/// Join a namespace and a measure name
pub fn qualified(namespace: &str, measure: &str) -> String {
    format!("{}/{}", namespace, measure)
}

/// A single tag key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: &'static str,
    pub value: String,
}

/// Aggregated data for one tag combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub tags: Vec<Tag>,
    pub data: AggregationData,
}

/// Snapshot of one view handed to exporters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewData {
    pub view: View,
    pub rows: Vec<Row>,
}

impl ViewData {
    /// Find the row whose tag values match `values` in order
    pub fn row(&self, values: &[&str]) -> Option<&Row> {
        self.rows.iter().find(|row| {
            row.tags.len() == values.len()
                && row.tags.iter().zip(values).all(|(t, v)| t.value == *v)
        })
    }
}
