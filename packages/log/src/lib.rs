//! Logging sink for the dirsync core.
//!
//! The core packages never touch a process-wide logger directly. Instead they
//! receive an [`Arc<dyn LogSink>`](LogSink) at construction time and report
//! through it:
//!
//! * [`LogCrateSink`] forwards to the `log` facade (the CLI installs
//!   `pretty_env_logger` behind it)
//! * [`FileSink`] appends timestamped lines to a log file
//! * [`TeeSink`] fans each record out to several sinks
//! * [`MemorySink`] records messages in memory for inspection in tests
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dirsync_log::{LogCrateSink, LogSink};
//!
//! let sink: Arc<dyn LogSink> = Arc::new(LogCrateSink::new());
//! sink.info("starting");
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod file;
mod memory;
mod sink;
mod tee;

pub use file::FileSink;
pub use log::{Level, LevelFilter};
pub use memory::{LogRecord, MemorySink};
pub use sink::{LogCrateSink, LogSink};
pub use tee::TeeSink;
