//! Rule storage, loading and evaluation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use dirsync_log::LogSink;
use path_clean::PathClean;

use crate::error::RuleError;

/// File name of the ignore file looked up when none is configured.
pub const DEFAULT_IGNORE_FILE: &str = ".syncignore";

/// A parsed, immutable set of ignore and force-include rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub(crate) root: PathBuf,
    pub(crate) equals_names: BTreeSet<String>,
    pub(crate) startswith_names: BTreeSet<String>,
    pub(crate) endswith_names: BTreeSet<String>,
    pub(crate) contains_names: BTreeSet<String>,
    pub(crate) ignore_abs_equals: BTreeSet<PathBuf>,
    pub(crate) ignore_abs_prefixes: BTreeSet<PathBuf>,
    pub(crate) include_abs_equals: BTreeSet<PathBuf>,
    pub(crate) include_abs_prefixes: BTreeSet<PathBuf>,
}

impl RuleSet {
    /// Create a rule set with no rules, bound to `root`.
    #[must_use]
    pub fn empty(root: &Path) -> Self {
        Self {
            root: absolutize(root),
            ..Self::default()
        }
    }

    /// Load rules for `root` from `ignore_file`.
    ///
    /// A missing ignore file (or a missing root) yields an empty rule set.
    /// Read failures are logged at error level and the rules parsed up to
    /// that point are kept.
    pub fn load(root: &Path, ignore_file: &Path, sink: &dyn LogSink) -> Self {
        let mut rules = Self::empty(root);

        if !rules.root.exists() {
            sink.debug(&format!(
                "Sync root {} does not exist, no rules loaded",
                rules.root.display()
            ));
            return rules;
        }

        if !ignore_file.exists() {
            sink.debug(&format!(
                "No ignore file at {}, syncing everything",
                ignore_file.display()
            ));
            return rules;
        }

        sink.debug(&format!("Loading ignore rules from {}", ignore_file.display()));

        if let Err(e) = rules.read_file(ignore_file, sink) {
            sink.error(&e.to_string());
        }

        rules.log_summary(sink);
        rules
    }

    /// Parse rules for `root` from in-memory ignore file contents.
    pub fn parse(root: &Path, contents: &str, sink: &dyn LogSink) -> Self {
        let mut rules = Self::empty(root);
        for line in contents.lines() {
            rules.add_line(line, sink);
        }
        rules.log_summary(sink);
        rules
    }

    fn read_file(&mut self, ignore_file: &Path, sink: &dyn LogSink) -> Result<(), RuleError> {
        let bytes = fs::read(ignore_file).map_err(|e| RuleError::ReadError {
            path: ignore_file.to_path_buf(),
            source: e,
        })?;

        for (index, raw) in bytes.split(|&b| b == b'\n').enumerate() {
            let line = std::str::from_utf8(raw).map_err(|_| RuleError::InvalidUtf8 {
                path: ignore_file.to_path_buf(),
                line: index + 1,
            })?;
            self.add_line(line, sink);
        }

        Ok(())
    }

    fn add_line(&mut self, line: &str, sink: &dyn LogSink) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        if self.add_pattern(line).is_none() {
            sink.debug(&format!("Dropped ignore rule: {line}"));
        }
    }

    fn log_summary(&self, sink: &dyn LogSink) {
        sink.debug(&format!("Ignore names equal to: {:?}", self.equals_names));
        sink.debug(&format!("Ignore names starting with: {:?}", self.startswith_names));
        sink.debug(&format!("Ignore names ending with: {:?}", self.endswith_names));
        sink.debug(&format!("Ignore names containing: {:?}", self.contains_names));
        sink.debug(&format!("Ignore paths equal to: {:?}", self.ignore_abs_equals));
        sink.debug(&format!("Ignore paths under: {:?}", self.ignore_abs_prefixes));
        sink.debug(&format!("Include paths equal to: {:?}", self.include_abs_equals));
        sink.debug(&format!("Include paths under: {:?}", self.include_abs_prefixes));
    }

    /// Decide whether `path` is ignored.
    ///
    /// `name` is the basename to test the name rules against; when `None`
    /// the last component of `path` is used. Force-include rules are checked
    /// first and win over every ignore rule.
    #[must_use]
    pub fn is_ignored(&self, path: &Path, name: Option<&str>) -> bool {
        let path = absolutize(path);

        if self.include_abs_equals.contains(&path)
            || self
                .include_abs_prefixes
                .iter()
                .any(|prefix| has_text_prefix(&path, prefix))
        {
            return false;
        }

        if self.ignore_abs_equals.contains(&path)
            || self
                .ignore_abs_prefixes
                .iter()
                .any(|prefix| has_text_prefix(&path, prefix))
        {
            return true;
        }

        let derived;
        let name = match name {
            Some(name) => name,
            None => {
                derived = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                derived.as_str()
            }
        };

        self.equals_names.contains(name)
            || self.startswith_names.iter().any(|p| name.starts_with(p.as_str()))
            || self.endswith_names.iter().any(|s| name.ends_with(s.as_str()))
            || self.contains_names.iter().any(|c| name.contains(c.as_str()))
    }

    /// The absolute root rooted rules were resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether no rule of any kind was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.equals_names.is_empty()
            && self.startswith_names.is_empty()
            && self.endswith_names.is_empty()
            && self.contains_names.is_empty()
            && self.ignore_abs_equals.is_empty()
            && self.ignore_abs_prefixes.is_empty()
            && self.include_abs_equals.is_empty()
            && self.include_abs_prefixes.is_empty()
    }

    /// Basenames that are always ignored.
    #[must_use]
    pub const fn equals_names(&self) -> &BTreeSet<String> {
        &self.equals_names
    }

    /// Basename prefixes that are ignored.
    #[must_use]
    pub const fn startswith_names(&self) -> &BTreeSet<String> {
        &self.startswith_names
    }

    /// Basename suffixes that are ignored.
    #[must_use]
    pub const fn endswith_names(&self) -> &BTreeSet<String> {
        &self.endswith_names
    }

    /// Basename substrings that are ignored.
    #[must_use]
    pub const fn contains_names(&self) -> &BTreeSet<String> {
        &self.contains_names
    }

    /// Absolute paths that are ignored.
    #[must_use]
    pub const fn ignore_abs_equals(&self) -> &BTreeSet<PathBuf> {
        &self.ignore_abs_equals
    }

    /// Absolute path prefixes that are ignored.
    #[must_use]
    pub const fn ignore_abs_prefixes(&self) -> &BTreeSet<PathBuf> {
        &self.ignore_abs_prefixes
    }

    /// Absolute paths that are always included.
    #[must_use]
    pub const fn include_abs_equals(&self) -> &BTreeSet<PathBuf> {
        &self.include_abs_equals
    }

    /// Absolute path prefixes that are always included.
    #[must_use]
    pub const fn include_abs_prefixes(&self) -> &BTreeSet<PathBuf> {
        &self.include_abs_prefixes
    }
}

/// Make `path` absolute against the working directory and lexically clean it.
pub(crate) fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.clean();
    }
    std::env::current_dir()
        .map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        .clean()
}

/// Textual prefix test, so `/src/build` also covers `/src/builder`.
fn has_text_prefix(path: &Path, prefix: &Path) -> bool {
    path.as_os_str()
        .as_encoded_bytes()
        .starts_with(prefix.as_os_str().as_encoded_bytes())
}
