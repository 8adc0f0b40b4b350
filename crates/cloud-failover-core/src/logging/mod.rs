//! Logging abstractions and sinks
//!
//! The failover service writes every attempt through a [`Logger`]. The
//! default setup built by [`build_logger`] mirrors JSON lines to a file and
//! colorized lines to the console.

mod traits;
mod console;
mod file_logger;
mod tee;
mod memory;
mod noop;

use std::sync::Arc;

pub use traits::{Logger, LogLevel, LogRecord, SharedLogger};
pub use console::ConsoleLogger;
pub use file_logger::JsonFileLogger;
pub use tee::TeeLogger;
pub use memory::MemoryLogger;
pub use noop::NoOpLogger;

use crate::config::LoggingConfig;

/// Build the logger described by `config`
///
/// A log file that cannot be opened is reported on the console and skipped;
/// logging never prevents the service from starting.
pub fn build_logger(config: &LoggingConfig) -> SharedLogger {
    let mut sinks: Vec<SharedLogger> = Vec::new();

    if let Some(path) = &config.file {
        match JsonFileLogger::open(path, config.level) {
            Ok(file) => sinks.push(Arc::new(file)),
            Err(e) => {
                ConsoleLogger::new().log(
                    &LogRecord::new(LogLevel::Warn, "Could not open log file, file logging disabled")
                        .with_field("path", path.display())
                        .with_field("error", e),
                );
            }
        }
    }

    if config.console {
        sinks.push(Arc::new(ConsoleLogger::new().with_min_level(config.level)));
    }

    match sinks.len() {
        0 => Arc::new(NoOpLogger::new()),
        1 => sinks.remove(0),
        _ => Arc::new(TeeLogger::new(sinks)),
    }
}
