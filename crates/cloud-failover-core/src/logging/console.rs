//! Console logger implementation

use owo_colors::OwoColorize;

use super::traits::{LogLevel, LogRecord, Logger};

/// A logger that prints colorized, human-readable lines
///
/// Debug, warn and error lines go to stderr; info and trace to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    min_level: LogLevel,
    colored: bool,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a new console logger with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "[cloud-failover]".to_string(),
            min_level: LogLevel::Info,
            colored: true,
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::new()
        }
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    fn level_label(&self, level: LogLevel) -> String {
        let label = level.as_str().to_uppercase();
        if !self.colored {
            return label;
        }
        match level {
            LogLevel::Error => label.red().bold().to_string(),
            LogLevel::Warn => label.yellow().to_string(),
            LogLevel::Info => label.green().to_string(),
            LogLevel::Debug => label.blue().to_string(),
            LogLevel::Trace => label.dimmed().to_string(),
        }
    }

    /// Render a record as `<prefix> LEVEL: message key=value ...`
    pub fn format(&self, record: &LogRecord) -> String {
        let mut line = format!("{} {}: {}", self.prefix, self.level_label(record.level), record.message);
        for (key, value) in &record.fields {
            line.push(' ');
            line.push_str(key);
            line.push('=');
            line.push_str(value);
        }
        line
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, record: &LogRecord) {
        if record.level < self.min_level {
            return;
        }
        let line = self.format(record);
        match record.level {
            LogLevel::Info | LogLevel::Trace => println!("{}", line),
            LogLevel::Debug | LogLevel::Warn | LogLevel::Error => eprintln!("{}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_creation() {
        let logger = ConsoleLogger::new();
        assert_eq!(logger.prefix, "[cloud-failover]");
        assert_eq!(logger.min_level, LogLevel::Info);

        let custom = ConsoleLogger::with_prefix("[MyApp]");
        assert_eq!(custom.prefix, "[MyApp]");
    }

    #[test]
    fn test_plain_format() {
        let logger = ConsoleLogger::new().with_colors(false);
        let record = LogRecord::new(LogLevel::Error, "Request failed")
            .with_field("provider", "google")
            .with_field("endpoint", "/users");
        assert_eq!(
            logger.format(&record),
            "[cloud-failover] ERROR: Request failed endpoint=/users provider=google"
        );
    }

    #[test]
    fn test_colored_format_keeps_text() {
        let logger = ConsoleLogger::new();
        let line = logger.format(&LogRecord::new(LogLevel::Warn, "falling back"));
        assert!(line.contains("WARN"));
        assert!(line.contains("falling back"));
        assert!(line.contains('\u{1b}'));
    }

    #[test]
    fn test_console_logger_logs() {
        // This test just verifies the logger doesn't panic
        let logger = ConsoleLogger::new().with_min_level(LogLevel::Trace);
        logger.debug("debug message");
        logger.info("info message");
        logger.warn("warn message");
        logger.error("error message");
    }
}
