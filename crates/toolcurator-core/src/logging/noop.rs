//! No-op logger implementation

use super::traits::{LogLevel, Logger};

/// A logger that does nothing
///
/// Used by tests and by callers that don't care about curator diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}
