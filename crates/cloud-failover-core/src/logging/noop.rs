//! No-op logger implementation

use super::traits::{LogRecord, Logger};

/// A logger that does nothing
///
/// Used when both the console and file sinks are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    /// Create a new no-op logger
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _record: &LogRecord) {}
}
