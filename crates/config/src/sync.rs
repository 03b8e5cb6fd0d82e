//! Batch synchronization settings
//!
//! These settings bound how a single batch run uses the target system.

use serde::Deserialize;
use std::time::Duration;

/// Synchronization settings for one batch run
///
/// # Example
///
/// ```toml
/// [sync]
/// update_parallelism = 1
/// update_timeout = "5m"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum number of metric updates in flight at once
    /// Default: 1 (serial). The target's request quota is the shared limit.
    pub update_parallelism: usize,

    /// Deadline for a whole batch; in-flight calls are cancelled once it passes
    /// Default: 5m
    #[serde(with = "humantime_serde")]
    pub update_timeout: Option<Duration>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            update_parallelism: 1,
            update_timeout: Some(Duration::from_secs(300)),
        }
    }
}
