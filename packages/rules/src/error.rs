//! Error types for rule loading.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading an ignore file.
///
/// None of these abort a sync: the loader logs them and keeps whatever
/// rules were parsed before the failure.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Failed to read the ignore file.
    #[error("Failed to read ignore file {}: {source}", path.display())]
    ReadError {
        /// Path to the ignore file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A line was not valid UTF-8.
    #[error("Ignore file {} is not valid UTF-8 at line {line}", path.display())]
    InvalidUtf8 {
        /// Path to the ignore file.
        path: PathBuf,
        /// One-based line number of the offending line.
        line: usize,
    },
}
