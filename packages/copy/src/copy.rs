//! File copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::digest::needs_copy;
use crate::error::CopyError;

/// Result of a change-aware copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Content differed (or the target was missing) and the file was copied.
    Copied,
    /// Target already had identical content, or the source is gone.
    Unchanged,
}

impl CopyOutcome {
    /// Number of files this outcome accounts for.
    #[must_use]
    pub const fn units(self) -> u64 {
        match self {
            Self::Copied => 1,
            Self::Unchanged => 0,
        }
    }
}

/// Copy `source` to `target` only if their contents differ.
///
/// # Errors
///
/// * If the target's parent directory cannot be created
/// * If the copy operation fails
pub fn copy_if_changed(source: &Path, target: &Path) -> Result<CopyOutcome, CopyError> {
    if !needs_copy(source, target) {
        return Ok(CopyOutcome::Unchanged);
    }

    copy_file(source, target)?;
    Ok(CopyOutcome::Copied)
}

/// Copy a single file, overwriting the target if it exists.
///
/// # Errors
///
/// * If `source` is not a regular file
/// * If the target's parent directory cannot be created
/// * If the copy operation fails
pub fn copy_file(source: &Path, target: &Path) -> Result<(), CopyError> {
    if !source.is_file() {
        return Err(CopyError::NotAFile(source.to_path_buf()));
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| CopyError::CreateDirError {
            path: parent.to_path_buf(),
            io_error: e,
        })?;
    }

    copy_file_with_reflink(source, target)
}

/// Copy a single file, trying reflink first then falling back to regular copy.
fn copy_file_with_reflink(source: &Path, target: &Path) -> Result<(), CopyError> {
    // Reflink refuses existing targets; fs::copy truncates and overwrites them.
    if reflink_copy::reflink(source, target).is_ok() {
        return Ok(());
    }

    fs::copy(source, target).map_err(|e| CopyError::FileCopyError {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    })?;

    Ok(())
}
