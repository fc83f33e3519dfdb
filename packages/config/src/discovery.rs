//! Configuration file discovery.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

/// File names looked up by [`discover_config`], in priority order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["dirsync.toml", "dirsync.json"];

/// Find the configuration file in `dir`, if any.
///
/// Only `dir` itself is searched; parent directories are not.
#[must_use]
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
