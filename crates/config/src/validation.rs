//! Configuration validation
//!
//! Validates config consistency:
//! - Log filter is non-empty and a log file, when set, has a path
//! - Batch concurrency bound is at least one
//! - Batch deadline, when set, is non-zero
//! - Stats namespace is present
//! - Enabled metrics name a source type and a target namespace

use crate::Config;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_log(config)?;
    validate_sync(config)?;
    validate_stats(config)?;
    validate_metrics(config)?;
    Ok(())
}

fn validate_log(config: &Config) -> Result<()> {
    if config.log.filter.trim().is_empty() {
        return Err(ConfigError::missing("log.filter"));
    }
    if config
        .log
        .file
        .as_ref()
        .is_some_and(|path| path.as_os_str().is_empty())
    {
        return Err(ConfigError::invalid("log.file", "path is empty"));
    }
    Ok(())
}

fn validate_sync(config: &Config) -> Result<()> {
    if config.sync.update_parallelism == 0 {
        return Err(ConfigError::invalid("sync.update_parallelism", "must be at least 1"));
    }

    if config.sync.update_timeout.is_some_and(|t| t.is_zero()) {
        return Err(ConfigError::invalid(
            "sync.update_timeout",
            "must be greater than zero",
        ));
    }

    Ok(())
}

fn validate_stats(config: &Config) -> Result<()> {
    let namespace = config.stats.namespace.trim();
    if namespace.is_empty() {
        return Err(ConfigError::missing("stats.namespace"));
    }
    if namespace.contains('/') {
        return Err(ConfigError::invalid("stats.namespace", "must not contain '/'"));
    }
    Ok(())
}

/// Disabled metrics are not checked; they never reach a batch
fn validate_metrics(config: &Config) -> Result<()> {
    for (name, metric) in config.metrics.enabled() {
        if metric.source_type.trim().is_empty() {
            return Err(ConfigError::missing(format!("metrics.{}.type", name)));
        }
        if metric.target_namespace.trim().is_empty() {
            return Err(ConfigError::missing(format!("metrics.{}.target_namespace", name)));
        }
    }
    Ok(())
}
