//! Error types for sync runs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole sync run.
///
/// Per-file and per-directory problems never surface here; they are logged
/// and counted in the [`SyncReport`](crate::SyncReport) instead.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source root does not exist.
    #[error("Source does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    /// The target lies inside the source, which would recurse forever.
    #[error("Target {} is inside source {}", target_root.display(), source_root.display())]
    TargetInsideSource {
        /// Source root.
        source_root: PathBuf,
        /// Target root.
        target_root: PathBuf,
    },

    /// A root path could not be made absolute.
    #[error("Failed to resolve {}: {io_error}", path.display())]
    ResolveError {
        /// The path that could not be resolved.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// The worker pool could not be started.
    #[error("Worker pool error: {0}")]
    PoolError(#[from] dirsync_pool::PoolError),
}
