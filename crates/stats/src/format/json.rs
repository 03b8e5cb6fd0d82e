//! JSON view formatter
//!
//! Formats each row as one structured JSON object for machine parsing.
//!
//! # Example Output
//!
//! ```json
//! {"view":"ts_bridge/import_latencies","unit":"ms","tags":{},"data":{"kind":"distribution","count":1,...}}
//! ```

use super::ViewFormatter;
use crate::aggregation::AggregationData;
use crate::view::ViewData;
use serde::Serialize;
use std::collections::BTreeMap;

/// JSON view formatter
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct RowJson<'a> {
    view: &'a str,
    unit: &'a str,
    tags: BTreeMap<&'a str, &'a str>,
    data: &'a AggregationData,
}

impl ViewFormatter for JsonFormatter {
    fn format_view(&self, data: &ViewData) -> String {
        data.rows
            .iter()
            .map(|row| {
                let json = RowJson {
                    view: &data.view.name,
                    unit: data.view.unit,
                    tags: row
                        .tags
                        .iter()
                        .map(|t| (t.key, t.value.as_str()))
                        .collect(),
                    data: &row.data,
                };
                serde_json::to_string(&json).unwrap_or_else(|_| "{}".to_string())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
