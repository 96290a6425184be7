//! Logger trait and level

use std::fmt;
use std::sync::Arc;

/// Severity of a diagnostic message, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for curator diagnostics, injected into every component
///
/// Implementors only write `log`; the per-level methods and the `log_*!`
/// macros route through it. Messages carry a `[Component]` prefix.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

pub type SharedLogger = Arc<dyn Logger>;

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logging::LogLevel::Debug, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logging::LogLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logging::LogLevel::Warn, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logging::LogLevel::Error, &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<(LogLevel, String)>>);

    impl Logger for Recording {
        fn log(&self, level: LogLevel, message: &str) {
            self.0.lock().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_level_methods_route_through_log() {
        let logger = Recording::default();
        logger.debug("a");
        logger.warn("b");
        crate::log_error!(logger, "[Scanner] {} failed", "fs/read");

        let seen = logger.0.lock().clone();
        assert_eq!(
            seen,
            vec![
                (LogLevel::Debug, "a".to_string()),
                (LogLevel::Warn, "b".to_string()),
                (LogLevel::Error, "[Scanner] fs/read failed".to_string()),
            ]
        );
        assert!(LogLevel::Debug < LogLevel::Error);
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }
}
