//! Fixed-size worker pool for dirsync copy tasks.
//!
//! Workers are spawned up front and block on a shared unbounded queue. Each
//! task returns the number of units it processed; failures (errors or
//! panics) are logged and counted without stopping the worker.
//!
//! [`WorkerPool::drain_and_stop`] closes the queue, waits for every queued
//! task to finish and returns the aggregated [`PoolReport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use dirsync_pool::WorkerPool;
//!
//! let pool = WorkerPool::new(4, sink)?;
//! pool.submit(move || copy_one(&source, &target))?;
//! let report = pool.drain_and_stop();
//! println!("{} files copied", report.units);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod pool;
mod report;

pub use error::PoolError;
pub use pool::{Job, TaskError, WorkerPool};
pub use report::{PoolReport, WorkerStats};
