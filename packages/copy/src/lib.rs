//! Content-based change detection and file copying.
//!
//! This crate decides whether a file needs to be copied by comparing SHA-256
//! digests of the source and target, and performs the copy:
//!
//! * [`digest`] hashes a regular file, streaming large files in chunks
//! * [`needs_copy`] compares source and target digests
//! * [`copy_if_changed`] copies only when the content differs, using
//!   copy-on-write via `reflink-copy` where the filesystem supports it
//!
//! # Example
//!
//! ```rust,ignore
//! use dirsync_copy::{copy_if_changed, CopyOutcome};
//!
//! match copy_if_changed(source, target)? {
//!     CopyOutcome::Copied => println!("updated"),
//!     CopyOutcome::Unchanged => println!("up to date"),
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod copy;
mod digest;
mod error;

pub use copy::{CopyOutcome, copy_file, copy_if_changed};
pub use digest::{CHUNK_SIZE, Digest, SMALL_FILE_THRESHOLD, digest, needs_copy};
pub use error::CopyError;
