//! Configuration types for dirsync.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use dirsync_engine::{DEFAULT_THREADS, SyncOptions};
use dirsync_rules::DEFAULT_IGNORE_FILE;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One layer of settings. Unset fields leave lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct ConfigLayer {
    /// Directory to mirror from.
    pub source: Option<PathBuf>,
    /// Directory to mirror into.
    pub target: Option<PathBuf>,
    /// Number of copy workers.
    pub threads: Option<usize>,
    /// Copy on the walking thread instead of a worker pool.
    pub inline: Option<bool>,
    /// Enable debug logging.
    pub debug: Option<bool>,
    /// Path to the ignore file.
    pub ignore_file: Option<PathBuf>,
    /// File to copy every log record into.
    pub log_file: Option<PathBuf>,
    /// Skip the confirmation prompt.
    pub assume_yes: Option<bool>,
}

impl ConfigLayer {
    /// Make relative paths in this layer relative to `base`.
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        for path in [
            &mut self.source,
            &mut self.target,
            &mut self.ignore_file,
            &mut self.log_file,
        ]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// On-disk configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// The `[general]` section.
    pub general: ConfigLayer,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory to mirror from.
    pub source: Option<PathBuf>,
    /// Directory to mirror into.
    pub target: Option<PathBuf>,
    /// Number of copy workers.
    pub threads: usize,
    /// Copy on the walking thread instead of a worker pool.
    pub inline: bool,
    /// Enable debug logging.
    pub debug: bool,
    /// Path to the ignore file.
    pub ignore_file: PathBuf,
    /// File to copy every log record into, if any.
    pub log_file: Option<PathBuf>,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            target: None,
            threads: DEFAULT_THREADS,
            inline: false,
            debug: false,
            ignore_file: PathBuf::from(DEFAULT_IGNORE_FILE),
            log_file: None,
            assume_yes: false,
        }
    }
}

impl Config {
    /// Resolve settings with precedence defaults < file < command line.
    #[must_use]
    pub fn resolve(file: Option<&ConfigLayer>, cli: &ConfigLayer) -> Self {
        let mut config = Self::default();
        if let Some(file) = file {
            config.merge(file);
        }
        config.merge(cli);
        config
    }

    /// Overlay every field that `layer` sets.
    pub fn merge(&mut self, layer: &ConfigLayer) {
        if let Some(source) = &layer.source {
            self.source = Some(source.clone());
        }
        if let Some(target) = &layer.target {
            self.target = Some(target.clone());
        }
        if let Some(threads) = layer.threads {
            self.threads = threads;
        }
        if let Some(inline) = layer.inline {
            self.inline = inline;
        }
        if let Some(debug) = layer.debug {
            self.debug = debug;
        }
        if let Some(ignore_file) = &layer.ignore_file {
            self.ignore_file = ignore_file.clone();
        }
        if let Some(log_file) = &layer.log_file {
            self.log_file = Some(log_file.clone());
        }
        if let Some(assume_yes) = layer.assume_yes {
            self.assume_yes = assume_yes;
        }
    }

    /// The source and target roots.
    ///
    /// # Errors
    ///
    /// * If either root is unset
    pub fn roots(&self) -> Result<(&Path, &Path), ConfigError> {
        let source = self.source.as_deref().ok_or(ConfigError::MissingSource)?;
        let target = self.target.as_deref().ok_or(ConfigError::MissingTarget)?;
        Ok((source, target))
    }

    /// Engine options for this configuration.
    #[must_use]
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            threads: (!self.inline).then_some(self.threads),
            ignore_file: self.ignore_file.clone(),
        }
    }
}
