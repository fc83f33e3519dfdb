//! TOML configuration file loader.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::ConfigFile;

/// Load a TOML configuration file.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed as TOML
pub fn load_toml_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_toml_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[general]
source = "/data/source"
target = "/backup/target"
threads = 4
debug = true
ignore_file = "rules.ignore"
log_file = "sync-tool.log"
assume_yes = true
"#
        )
        .unwrap();

        let config = load_toml_config(file.path()).unwrap().general;

        assert_eq!(config.source, Some(PathBuf::from("/data/source")));
        assert_eq!(config.target, Some(PathBuf::from("/backup/target")));
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.debug, Some(true));
        assert_eq!(config.ignore_file, Some(PathBuf::from("rules.ignore")));
        assert_eq!(config.log_file, Some(PathBuf::from("sync-tool.log")));
        assert_eq!(config.assume_yes, Some(true));
        assert_eq!(config.inline, None);
    }

    #[test]
    fn test_load_empty_toml_config() {
        let file = NamedTempFile::new().unwrap();

        let config = load_toml_config(file.path()).unwrap();

        assert_eq!(config.general.source, None);
        assert_eq!(config.general.threads, None);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[general]\nthread_size = 4").unwrap();

        let err = load_toml_config(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::TomlParseError { .. }));
    }
}
