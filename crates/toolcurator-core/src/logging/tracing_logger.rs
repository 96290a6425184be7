//! Logger that forwards to the `tracing` crate
//!
//! Lets a host process install any `tracing` subscriber and receive curator
//! diagnostics alongside its own spans.

use super::traits::{LogLevel, Logger};

/// Forwards every message to a `tracing` event under a fixed target
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: String,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new("toolcurator")
    }
}

impl TracingLogger {
    /// Create a logger tagging events with `component`
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let component = self.component.as_str();
        match level {
            LogLevel::Debug => tracing::debug!(component, "{}", message),
            LogLevel::Info => tracing::info!(component, "{}", message),
            LogLevel::Warn => tracing::warn!(component, "{}", message),
            LogLevel::Error => tracing::error!(component, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_logger_without_subscriber() {
        // No subscriber installed: events are dropped silently
        let logger = TracingLogger::new("curator-test");
        assert_eq!(logger.component(), "curator-test");
        logger.debug("debug message");
        logger.info("info message");
        logger.warn("warn message");
        logger.error("error message");
    }
}
