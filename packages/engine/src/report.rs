//! Sync run summary.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use dirsync_pool::PoolReport;

/// Counters describing one completed sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Files whose content was written to the target.
    pub copied: u64,
    /// File copy tasks started (inline or queued).
    pub tasks: u64,
    /// Copy tasks that completed without error.
    pub succeeded: u64,
    /// Copy tasks that failed.
    pub failed: u64,
    /// Target directories created.
    pub dirs_created: u64,
    /// Entries pruned by ignore rules.
    pub ignored: u64,
    /// Symlinks and special files that were not synced.
    pub skipped: u64,
    /// Directories that could not be listed or created.
    pub walk_errors: u64,
}

impl SyncReport {
    pub(crate) fn absorb_pool(&mut self, pool: &PoolReport) {
        self.tasks += pool.submitted;
        self.succeeded += pool.succeeded;
        self.failed += pool.failed;
        self.copied = pool.units;
    }

    /// Whether any task or directory failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0 || self.walk_errors > 0
    }
}
