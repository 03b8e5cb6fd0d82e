//! Process-wide log subscriber

use crate::error::BridgeError;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};
use tsbridge_config::{DEFAULT_LOG_FILTER, LogConfig, LogFormat};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global `tracing` subscriber described by `config`
///
/// An unparsable filter falls back to `info`. Fails if the log file cannot
/// be opened or a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), BridgeError> {
    let filter = EnvFilter::try_new(&config.filter)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .map_err(|e| BridgeError::Logging(format!("invalid log filter: {}", e)))?;

    let writer = match &config.file {
        Some(path) => BoxMakeWriter::new(Arc::new(open_log_file(path)?)),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::registry()
        .with(fmt_layer(config.format, writer))
        .with(filter)
        .try_init()
        .map_err(|e| BridgeError::Logging(e.to_string()))
}

fn fmt_layer(format: LogFormat, writer: BoxMakeWriter) -> BoxedLayer {
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(writer);
    match format {
        LogFormat::Console => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Open `path` for appending, creating it if needed
fn open_log_file(path: &Path) -> Result<File, BridgeError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            BridgeError::Logging(format!(
                "failed to open log file '{}': {}",
                path.display(),
                e
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_second_init_fails() {
        let config = LogConfig {
            filter: "debug".into(),
            format: LogFormat::Json,
            file: None,
        };

        // other tests in this binary may have installed one already
        let _ = init_logging(&config);
        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, BridgeError::Logging(_)));
    }

    #[test]
    fn test_unopenable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            file: Some(dir.path().join("missing").join("tsbridge.log")),
            ..LogConfig::default()
        };

        match init_logging(&config) {
            Err(BridgeError::Logging(msg)) => {
                assert!(msg.starts_with("failed to open log file"), "{}", msg)
            }
            other => panic!("expected a logging error, got {:?}", other),
        }
    }

    #[test]
    fn test_log_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tsbridge.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "this run").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "earlier run\nthis run\n");
    }

    #[test]
    fn test_log_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
