//! View output formatters
//!
//! Formats exported views for human-readable or JSON log output.

mod human;
mod json;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

use crate::view::ViewData;

/// Trait for view formatters
pub trait ViewFormatter: Send + Sync {
    /// Format one view, one line per row
    fn format_view(&self, data: &ViewData) -> String;
}

/// Format a millisecond value with a unit that keeps it readable
pub fn format_millis(ms: f64) -> String {
    const SEC: f64 = 1_000.0;
    const MIN: f64 = 60.0 * SEC;
    const HOUR: f64 = 60.0 * MIN;

    if ms >= HOUR {
        format!("{:.1}h", ms / HOUR)
    } else if ms >= MIN {
        format!("{:.1}m", ms / MIN)
    } else if ms >= SEC {
        format!("{:.1}s", ms / SEC)
    } else {
        format!("{:.0}ms", ms)
    }
}
