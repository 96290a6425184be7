//! Logging abstractions for runtime-agnostic logging

mod traits;
mod noop;
mod console;
mod tracing_logger;

pub use traits::{LogLevel, Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use tracing_logger::TracingLogger;
