//! Configuration loading for dirsync.
//!
//! Settings come from three layers, later layers winning field by field:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A configuration file (`dirsync.toml` or `dirsync.json`)
//! 3. Command-line arguments
//!
//! # Example
//!
//! ```rust,ignore
//! use dirsync_config::{Config, ConfigLayer, discover_config, load_config};
//!
//! let file = discover_config(&cwd).map(|p| load_config(&p)).transpose()?;
//! let config = Config::resolve(file.as_ref(), &cli_layer);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod json_loader;
mod toml_loader;
mod types;

pub use discovery::{CONFIG_FILE_NAMES, discover_config};
pub use error::ConfigError;
pub use json_loader::load_json_config;
pub use toml_loader::load_toml_config;
pub use types::{Config, ConfigFile, ConfigLayer};

use std::path::Path;

/// Load a configuration file, auto-detecting the format based on extension.
///
/// Relative paths inside the file are resolved against the file's directory.
///
/// # Errors
///
/// * If the file extension is not supported
/// * If the file cannot be read
/// * If the file cannot be parsed
pub fn load_config(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let file = match extension {
        "toml" => load_toml_config(path)?,
        "json" => load_json_config(path)?,
        _ => return Err(ConfigError::UnsupportedFormat(extension.to_string())),
    };

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(file.general.relative_to(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dirsync.toml");
        fs::write(&path, "[general]\nsource = \"src\"\ntarget = \"/abs\"\n").unwrap();

        let layer = load_config(&path).unwrap();

        assert_eq!(layer.source, Some(dir.path().join("src")));
        assert_eq!(layer.target, Some(PathBuf::from("/abs")));
    }

    #[test]
    fn test_load_config_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[general]").unwrap();

        let err = load_config(&path).unwrap_err();

        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "ini"));
    }
}
