//! In-memory logger for tests

use parking_lot::Mutex;

use super::traits::{LogLevel, LogRecord, Logger};

/// A logger that keeps every record in memory
///
/// Useful for asserting on what the failover service logged.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Records at exactly `level`
    pub fn records_at(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.records.lock().iter().filter(|r| r.level == level).count()
    }

    /// Records at `level` whose `field` equals `value`
    pub fn find(&self, level: LogLevel, field: &str, value: &str) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level && r.field(field) == Some(value))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, record: &LogRecord) {
        self.records.lock().push(record.clone());
    }
}
