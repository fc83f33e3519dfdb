//! One-way directory synchronization.
//!
//! [`SyncEngine`] walks a source tree alongside a target tree and:
//!
//! * prunes entries matched by the ignore [`RuleSet`](dirsync_rules::RuleSet)
//! * creates missing target directories before descending into them
//! * copies files whose content differs from the target, either inline or
//!   through a [`WorkerPool`](dirsync_pool::WorkerPool)
//!
//! Nothing in the target is ever deleted, and symlinks below the source root
//! are never followed.
//!
//! # Example
//!
//! ```rust,ignore
//! use dirsync_engine::{SyncOptions, sync_dirs};
//!
//! let report = sync_dirs(source, target, &SyncOptions::default(), sink)?;
//! println!("{} files copied", report.copied);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod engine;
mod error;
mod report;
mod task;

pub use engine::{DEFAULT_THREADS, SyncEngine, SyncOptions, sync_dirs};
pub use error::SyncError;
pub use report::SyncReport;
pub use task::CopyTask;
