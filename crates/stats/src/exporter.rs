//! Exporter sink for aggregated views

use crate::format::{HumanFormatter, JsonFormatter, ViewFormatter};
use crate::view::ViewData;
use tracing::info;
use tsbridge_config::StatsFormat;

/// Receives aggregated views when a collector flushes
///
/// Implementations wrap a telemetry backend. `export_view` is called once per
/// registered view, then `flush` once, before `StatsCollector::flush` returns.
pub trait Exporter: Send + Sync {
    /// Accept the current state of one view
    fn export_view(&self, data: &ViewData);

    /// Push anything buffered by `export_view` to the backend
    fn flush(&self) {}
}

/// Exporter that writes every view row through `tracing`
pub struct LogExporter {
    formatter: Box<dyn ViewFormatter>,
}

impl LogExporter {
    /// Create a log exporter in the given format
    pub fn new(format: StatsFormat) -> Self {
        let formatter: Box<dyn ViewFormatter> = match format {
            StatsFormat::Human => Box::new(HumanFormatter::new()),
            StatsFormat::Json => Box::new(JsonFormatter::new()),
        };
        Self { formatter }
    }
}

impl Exporter for LogExporter {
    fn export_view(&self, data: &ViewData) {
        let output = self.formatter.format_view(data);
        for line in output.lines() {
            info!("{}", line);
        }
    }
}
