//! Ignore-file pattern grammar.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::rule_set::{RuleSet, absolutize};

/// Which rule category a pattern was registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleKind {
    /// Basename equals.
    NameEquals,
    /// Basename starts with.
    NameStartsWith,
    /// Basename ends with.
    NameEndsWith,
    /// Basename contains.
    NameContains,
    /// Absolute path equals (ignore).
    IgnorePath,
    /// Absolute path prefix (ignore).
    IgnorePathPrefix,
    /// Absolute path equals (force include).
    IncludePath,
    /// Absolute path prefix (force include).
    IncludePathPrefix,
}

impl RuleSet {
    /// Register a single pattern.
    ///
    /// `pattern` must already be trimmed and must not be a comment. Returns
    /// the category the rule landed in, or `None` when the pattern was
    /// dropped (empty after stripping markers, or a path rule whose target
    /// does not exist).
    pub(crate) fn add_pattern(&mut self, pattern: &str) -> Option<RuleKind> {
        if let Some(negated) = pattern.strip_prefix('!') {
            return self.add_include(negated);
        }

        if let Some(rest) = pattern.strip_prefix('*') {
            let rest = rest.trim();
            return match rest.strip_suffix('*') {
                Some(inner) => insert_name(&mut self.contains_names, inner, RuleKind::NameContains),
                None => insert_name(&mut self.endswith_names, rest, RuleKind::NameEndsWith),
            };
        }

        if let Some(stem) = pattern.strip_suffix('*') {
            if stem.is_empty() {
                return None;
            }
            if let Some(rooted) = stem.strip_prefix('/') {
                let path = self.resolve_rooted(rooted)?;
                self.ignore_abs_prefixes.insert(path);
                return Some(RuleKind::IgnorePathPrefix);
            }
            if let Some(path) = existing_absolute(stem) {
                self.ignore_abs_prefixes.insert(path);
                return Some(RuleKind::IgnorePathPrefix);
            }
            return insert_name(&mut self.startswith_names, stem, RuleKind::NameStartsWith);
        }

        if let Some(rooted) = pattern.strip_prefix('/') {
            let path = self.resolve_rooted(rooted)?;
            self.ignore_abs_equals.insert(path);
            return Some(RuleKind::IgnorePath);
        }

        if let Some(path) = existing_absolute(pattern) {
            self.ignore_abs_equals.insert(path);
            return Some(RuleKind::IgnorePath);
        }

        insert_name(
            &mut self.equals_names,
            pattern.trim_end_matches('/'),
            RuleKind::NameEquals,
        )
    }

    fn add_include(&mut self, pattern: &str) -> Option<RuleKind> {
        let (stem, prefix) = match pattern.strip_suffix('*') {
            Some(stem) => (stem, true),
            None => (pattern, false),
        };
        if stem.is_empty() {
            return None;
        }

        let path = match stem.strip_prefix('/') {
            Some(rooted) => self.resolve_rooted(rooted)?,
            None => existing_absolute(stem)?,
        };

        if prefix {
            self.include_abs_prefixes.insert(path);
            Some(RuleKind::IncludePathPrefix)
        } else {
            self.include_abs_equals.insert(path);
            Some(RuleKind::IncludePath)
        }
    }

    /// Resolve a root-relative pattern, keeping it only if it exists.
    fn resolve_rooted(&self, rooted: &str) -> Option<PathBuf> {
        if rooted.is_empty() {
            return None;
        }
        let path = absolutize(&self.root.join(rooted));
        path.exists().then_some(path)
    }
}

/// An absolute path literal that exists on disk.
fn existing_absolute(literal: &str) -> Option<PathBuf> {
    let path = Path::new(literal);
    (path.is_absolute() && path.exists()).then(|| absolutize(path))
}

fn insert_name(
    set: &mut std::collections::BTreeSet<String>,
    name: &str,
    kind: RuleKind,
) -> Option<RuleKind> {
    if name.is_empty() {
        return None;
    }
    set.insert(name.to_string());
    Some(kind)
}
