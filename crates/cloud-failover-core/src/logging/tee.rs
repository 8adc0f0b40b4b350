//! Fan-out logger

use super::traits::{LogRecord, Logger, SharedLogger};

/// Mirrors every record to each of its sinks, in order
pub struct TeeLogger {
    sinks: Vec<SharedLogger>,
}

impl TeeLogger {
    pub fn new(sinks: Vec<SharedLogger>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Logger for TeeLogger {
    fn log(&self, record: &LogRecord) {
        for sink in &self.sinks {
            sink.log(record);
        }
    }
}

// Implement Debug manually since Arc<dyn Logger> doesn't implement Debug
impl std::fmt::Debug for TeeLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeeLogger")
            .field("sinks", &format!("[{} sinks]", self.sinks.len()))
            .finish()
    }
}
