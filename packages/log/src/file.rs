//! File-backed sink.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use log::{Level, LevelFilter};

use crate::sink::LogSink;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sink that appends one line per record to a log file.
///
/// Lines look like `[INFO][2024-05-01 12:00:00] - message`. Write failures
/// are dropped so a full disk never aborts a sync.
#[derive(Debug)]
pub struct FileSink {
    max_level: LevelFilter,
    writer: Mutex<LineWriter<File>>,
}

impl FileSink {
    /// Create (or truncate) the log file at `path`.
    ///
    /// Records more verbose than `max_level` are not written.
    ///
    /// # Errors
    ///
    /// * If the file cannot be created
    pub fn create(path: &Path, max_level: LevelFilter) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            max_level,
            writer: Mutex::new(LineWriter::new(file)),
        })
    }
}

impl LogSink for FileSink {
    fn log(&self, level: Level, message: &str) {
        if level > self.max_level {
            return;
        }

        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "[{level}][{timestamp}] - {message}");
    }
}
