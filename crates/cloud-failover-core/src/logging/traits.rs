//! Logger trait and structured log records

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const RESERVED_KEYS: [&str; 3] = ["timestamp", "level", "message"];

/// Log levels, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// A single structured log entry
///
/// Serializes as one flat JSON object:
/// `{"timestamp": "...", "level": "error", "message": "...", "provider": "google"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl LogRecord {
    /// Create a record stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Attach a context field
    ///
    /// Keys that would collide with the record's own `timestamp`, `level`, or
    /// `message` once flattened are stored as `field.<key>`.
    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let mut key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            key = format!("field.{}", key);
        }
        self.fields.insert(key, value.to_string());
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Logger abstraction for pluggable log sinks
///
/// Implementations:
/// - `ConsoleLogger`: colorized lines on stdout/stderr
/// - `JsonFileLogger`: JSON lines appended to a file
/// - `TeeLogger`: mirrors records to several sinks
/// - `MemoryLogger`: keeps records in memory for assertions
/// - `NoOpLogger`: discards everything
pub trait Logger: Send + Sync {
    /// Write a structured record
    fn log(&self, record: &LogRecord);

    /// Log a debug message
    fn debug(&self, message: &str) {
        self.log(&LogRecord::new(LogLevel::Debug, message));
    }

    /// Log an info message
    fn info(&self, message: &str) {
        self.log(&LogRecord::new(LogLevel::Info, message));
    }

    /// Log a warning message
    fn warn(&self, message: &str) {
        self.log(&LogRecord::new(LogLevel::Warn, message));
    }

    /// Log an error message
    fn error(&self, message: &str) {
        self.log(&LogRecord::new(LogLevel::Error, message));
    }
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;
