//! Error types for the sync pipeline

use thiserror::Error;

/// Errors returned by a source
///
/// `Fetch` carries the source's own message verbatim so it can be surfaced
/// unchanged in a metric's status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Source-side configuration is invalid (e.g. a query does not resolve)
    #[error("invalid source configuration: {0}")]
    Config(String),

    /// Fetching new data failed
    #[error("{0}")]
    Fetch(String),

    /// The batch was cancelled while the call was in flight
    #[error("operation cancelled")]
    Cancelled,
}

/// Errors returned by the target monitoring backend
///
/// Every variant displays the backend's message unchanged; the variant only
/// classifies it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// Request failed (transport, server error, ...)
    #[error("{0}")]
    Request(String),

    /// Request quota exhausted
    #[error("{0}")]
    Quota(String),

    /// Points or descriptor rejected by the backend's schema
    #[error("{0}")]
    Schema(String),

    /// The batch was cancelled while the call was in flight
    #[error("operation cancelled")]
    Cancelled,
}

/// Errors returned by record storage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage backend failed
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors that escape a metric update or a batch
///
/// Remote call failures are not in here: they are captured in the metric's
/// status. These are the errors a caller has to report.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The source rejected its configuration while the metric was built
    #[error("metric '{metric}': {source}")]
    Source {
        metric: String,
        #[source]
        source: SourceError,
    },

    /// No source implementation exists for the configured type
    #[error("metric '{metric}' has unknown source type '{source_type}'")]
    UnknownSourceType { metric: String, source_type: String },

    /// The source mapped the metric to an empty target name
    #[error("metric '{0}' maps to an empty target metric name")]
    EmptyTargetName(String),

    /// Loading, saving or cleaning up records failed
    #[error("record storage for '{metric}': {source}")]
    Storage {
        metric: String,
        #[source]
        source: StorageError,
    },

    /// Removing records of unconfigured metrics failed
    #[error("record cleanup: {0}")]
    Cleanup(#[source] StorageError),

    /// Logging could not be initialized
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl BridgeError {
    /// Name of the metric the error belongs to, if any
    pub fn metric(&self) -> Option<&str> {
        match self {
            Self::Source { metric, .. }
            | Self::UnknownSourceType { metric, .. }
            | Self::Storage { metric, .. } => Some(metric),
            Self::EmptyTargetName(metric) => Some(metric),
            Self::Cleanup(_) | Self::Logging(_) => None,
        }
    }
}
