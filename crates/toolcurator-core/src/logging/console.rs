//! Console logger implementation

use super::traits::{LogLevel, Logger};

/// A logger that writes to stdout/stderr with a fixed prefix
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    verbose: bool,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger with the default `[ToolCurator]` prefix
    pub fn new() -> Self {
        Self {
            prefix: "[ToolCurator]".to_string(),
            verbose: false,
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            verbose: false,
        }
    }

    /// Also print debug messages
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    fn format(&self, level: LogLevel, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level, message)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug if !self.verbose => {}
            LogLevel::Info => println!("{}", self.format(level, message)),
            _ => eprintln!("{}", self.format(level, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_creation() {
        let logger = ConsoleLogger::new();
        assert_eq!(logger.prefix, "[ToolCurator]");
        assert!(!logger.verbose);

        let custom = ConsoleLogger::with_prefix("[Evaluator]").verbose();
        assert_eq!(custom.prefix, "[Evaluator]");
        assert!(custom.verbose);
    }

    #[test]
    fn test_format() {
        let logger = ConsoleLogger::new();
        assert_eq!(
            logger.format(LogLevel::Warn, "scanner unavailable"),
            "[ToolCurator] WARN: scanner unavailable"
        );
    }
}
