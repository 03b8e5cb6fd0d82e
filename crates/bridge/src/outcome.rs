//! Result of a single metric update

use std::fmt;

/// Terminal state of one metric update
///
/// Renders to the status text stored in `MetricRecord::last_status`. The
/// text is matched by operators and external tooling, so the wording is
/// fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Reading the cursor from the target failed; nothing was fetched
    TimestampError(String),
    /// Fetching new data from the source failed
    FetchError(String),
    /// The source had nothing newer than the cursor
    NoData,
    /// Writing to the target failed; the cursor did not move
    WriteError(String),
    /// `points` entries were written
    Success { points: usize },
}

impl UpdateOutcome {
    /// Whether new data reached the target
    pub fn advances_cursor(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::TimestampError(_) | Self::FetchError(_) | Self::WriteError(_)
        )
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimestampError(detail) => {
                write!(f, "failed to get latest timestamp: {}", detail)
            }
            Self::FetchError(detail) => write!(f, "failed to get data: {}", detail),
            Self::NoData => write!(f, "0 new points found"),
            Self::WriteError(detail) => write!(f, "failed to write to Stackdriver: {}", detail),
            Self::Success { points } => write!(f, "{} new points found", points),
        }
    }
}
