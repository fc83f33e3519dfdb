//! Content digests and change detection.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use sha2::{Digest as _, Sha256};

use crate::error::CopyError;

/// Files smaller than this are hashed from a single read.
pub const SMALL_FILE_THRESHOLD: u64 = 1024 * 1024;

/// Read size used when streaming larger files.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// A SHA-256 digest of a file's full content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Digest of an in-memory buffer.
    #[must_use]
    pub fn of_bytes(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Lowercase hex representation.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Digest({})", hex.get(..16).unwrap_or(&hex))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute the digest of a regular file.
///
/// Returns `Ok(None)` if `path` is not a regular file.
///
/// # Errors
///
/// * If the file cannot be opened or read
pub fn digest(path: &Path) -> Result<Option<Digest>, CopyError> {
    if !path.is_file() {
        return Ok(None);
    }

    let hash_error = |e| CopyError::HashError {
        path: path.to_path_buf(),
        io_error: e,
    };

    let size = fs::metadata(path).map_err(hash_error)?.len();

    if size < SMALL_FILE_THRESHOLD {
        let data = fs::read(path).map_err(hash_error)?;
        return Ok(Some(Digest::of_bytes(&data)));
    }

    let mut file = File::open(path).map_err(hash_error)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(hash_error)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Some(Digest(hasher.finalize().into())))
}

/// Decide whether `source` must be copied over `target`.
///
/// * Missing source: never copy
/// * Missing target: always copy
/// * Otherwise copy when the digests differ, or when either side cannot be
///   hashed (the copy itself then reports the real failure)
#[must_use]
pub fn needs_copy(source: &Path, target: &Path) -> bool {
    if !source.exists() {
        return false;
    }
    if !target.exists() {
        return true;
    }

    match (digest(source), digest(target)) {
        (Ok(Some(a)), Ok(Some(b))) => a != b,
        _ => true,
    }
}
