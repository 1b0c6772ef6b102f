//! Diagnostic Sink
//!
//! Non-fatal findings (unclaimed children in lenient mode, arrays with no
//! matching items, text routed through `unknown_value`) are reported through a
//! [`Logger`]. A process-wide sink may be installed once with [`set_logger`];
//! individual parses can override it through `ParserOverrides::logger`.

use std::sync::Arc;

use once_cell::sync::OnceCell;

/// Leveled diagnostic sink
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards diagnostics to `tracing` under the `xmlmap` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "xmlmap", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "xmlmap", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "xmlmap", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "xmlmap", "{message}");
    }
}

static LOGGER: OnceCell<Option<Arc<dyn Logger>>> = OnceCell::new();

/// Returned when the process-wide sink was already installed
#[derive(Debug, thiserror::Error)]
#[error("diagnostic logger already set")]
pub struct SetLoggerError;

/// Install the process-wide diagnostic sink. `None` silences diagnostics.
///
/// Call once before parsing starts; later calls fail and leave the first
/// sink in place.
pub fn set_logger(logger: Option<Arc<dyn Logger>>) -> Result<(), SetLoggerError> {
    LOGGER.set(logger).map_err(|_| SetLoggerError)
}

/// The process-wide sink, if one was installed
pub fn global_logger() -> Option<Arc<dyn Logger>> {
    LOGGER.get().cloned().flatten()
}
