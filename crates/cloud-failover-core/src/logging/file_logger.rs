//! JSON-lines file logger
//!
//! Appends one JSON object per record so the log can be tailed and parsed
//! by line-oriented tooling.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::traits::{LogLevel, LogRecord, Logger};

/// A logger that appends structured records to a file
pub struct JsonFileLogger {
    path: PathBuf,
    file: Mutex<File>,
    min_level: LogLevel,
}

impl JsonFileLogger {
    /// Open (or create) the log file for appending, creating parent directories
    pub fn open(path: impl Into<PathBuf>, min_level: LogLevel) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
            min_level,
        })
    }

    /// Get the path to the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Logger for JsonFileLogger {
    fn log(&self, record: &LogRecord) {
        if record.level < self.min_level {
            return;
        }
        let Ok(line) = serde_json::to_string(record) else {
            return;
        };
        let mut file = self.file.lock();
        let _ = writeln!(file, "{}", line);
        let _ = file.flush();
    }
}

impl std::fmt::Debug for JsonFileLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileLogger")
            .field("path", &self.path)
            .field("min_level", &self.min_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_json_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("failover.log");
        let logger = JsonFileLogger::open(&path, LogLevel::Info).unwrap();

        logger.log(&LogRecord::new(LogLevel::Info, "Attempting request").with_field("provider", "google"));
        logger.log(&LogRecord::new(LogLevel::Error, "Request failed").with_field("error", "timeout"));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["level"], "info");
        assert_eq!(lines[0]["provider"], "google");
        assert_eq!(lines[1]["level"], "error");
        assert_eq!(lines[1]["error"], "timeout");
    }

    #[test]
    fn test_level_filtering() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("failover.log");
        let logger = JsonFileLogger::open(&path, LogLevel::Warn).unwrap();

        logger.debug("hidden");
        logger.info("hidden");
        logger.warn("shown");

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["message"], "shown");
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("failover.log");

        JsonFileLogger::open(&path, LogLevel::Info).unwrap().info("first");
        JsonFileLogger::open(&path, LogLevel::Info).unwrap().info("second");

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["message"], "second");
    }
}
