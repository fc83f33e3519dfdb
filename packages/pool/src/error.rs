//! Error types for the worker pool.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error;

/// Errors that can occur when creating or feeding the pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// A worker thread could not be spawned.
    #[error("Failed to spawn worker thread {index}: {source}")]
    SpawnError {
        /// Index of the worker that failed to start.
        index: usize,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The queue no longer accepts tasks.
    #[error("Worker pool is closed")]
    Closed,
}
