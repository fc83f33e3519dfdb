//! Fan-out sink.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;

use log::Level;

use crate::sink::LogSink;

/// Sink that forwards every record to each of its sinks, in order.
#[derive(Clone)]
pub struct TeeSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl TeeSink {
    /// Create a sink writing to all of `sinks`.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self { sinks }
    }
}

impl std::fmt::Debug for TeeSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeeSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl LogSink for TeeSink {
    fn log(&self, level: Level, message: &str) {
        for sink in &self.sinks {
            sink.log(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySink;

    #[test]
    fn test_every_sink_sees_every_record() {
        let first = Arc::new(MemorySink::new());
        let second = Arc::new(MemorySink::new());
        let first_sink: Arc<dyn LogSink> = first.clone();
        let second_sink: Arc<dyn LogSink> = second.clone();
        let tee = TeeSink::new(vec![first_sink, second_sink]);

        tee.info("one");
        tee.error("two");

        for memory in [first, second] {
            assert_eq!(memory.records().len(), 2);
            assert!(memory.contains(Level::Info, "one"));
            assert!(memory.contains(Level::Error, "two"));
        }
    }
}
