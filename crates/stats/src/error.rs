//! Error types for stats registration

use thiserror::Error;

/// Errors raised while registering views
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A different view is already registered under this name
    #[error("view '{0}' is already registered with a different definition")]
    ViewConflict(String),

    /// View name is empty or otherwise unusable
    #[error("invalid view name: {0}")]
    InvalidName(String),
}
