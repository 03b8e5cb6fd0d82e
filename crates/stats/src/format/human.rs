//! Human-readable view formatter
//!
//! # Example Output
//!
//! ```text
//! [stats] ts_bridge/metric_import_latencies{metric_name=checkout} count=3 mean=120ms max=310ms
//! [stats] ts_bridge/import_latencies count=1 mean=1.2s max=1.2s
//! [stats] ts_bridge/oldest_metric_age 4.0m
//! ```

use super::{ViewFormatter, format_millis};
use crate::aggregation::AggregationData;
use crate::view::{Row, ViewData};
use std::fmt::Write;

/// Human-readable view formatter
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    /// Create a new human formatter
    pub fn new() -> Self {
        Self
    }

    fn format_row(&self, name: &str, row: &Row) -> String {
        let mut output = format!("[stats] {}", name);

        if !row.tags.is_empty() {
            output.push('{');
            for (i, tag) in row.tags.iter().enumerate() {
                if i > 0 {
                    output.push(',');
                }
                let _ = write!(output, "{}={}", tag.key, tag.value);
            }
            output.push('}');
        }

        match &row.data {
            AggregationData::Distribution(d) => {
                let _ = write!(
                    output,
                    " count={} mean={} max={}",
                    d.count,
                    format_millis(d.mean),
                    format_millis(d.max),
                );
            }
            AggregationData::LastValue(l) => {
                let _ = write!(output, " {}", format_millis(l.value));
            }
        }

        output
    }
}

impl ViewFormatter for HumanFormatter {
    fn format_view(&self, data: &ViewData) -> String {
        data.rows
            .iter()
            .map(|row| self.format_row(&data.view.name, row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
