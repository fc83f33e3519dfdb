//! The `LogSink` trait and its `log`-crate backed implementation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use log::Level;

/// Destination for leveled messages emitted by the sync core.
///
/// Implementations must be shareable across worker threads.
pub trait LogSink: Send + Sync {
    /// Emit a message at the given level.
    fn log(&self, level: Level, message: &str);

    /// Emit a debug message.
    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    /// Emit an informational message.
    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Emit a warning.
    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    /// Emit an error.
    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Sink that forwards everything to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogCrateSink {
    target: &'static str,
}

impl LogCrateSink {
    /// The `log` target every record is emitted under.
    pub const DEFAULT_TARGET: &'static str = "dirsync";

    /// Create a sink logging under the default `dirsync` target.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            target: Self::DEFAULT_TARGET,
        }
    }
}

impl Default for LogCrateSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for LogCrateSink {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: self.target, level, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target() {
        assert_eq!(LogCrateSink::default().target, LogCrateSink::DEFAULT_TARGET);
    }

    #[test]
    fn test_logging_without_backend_is_noop() {
        // No logger installed: the facade silently drops the record.
        let sink = LogCrateSink::new();
        sink.debug("debug");
        sink.info("info");
        sink.error("error");
    }
}
