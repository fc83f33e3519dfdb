//! Ignore-file rules for dirsync.
//!
//! An ignore file holds one pattern per line. Lines that are empty or start
//! with `#` are skipped. The supported patterns are:
//!
//! * `name` - ignore entries whose basename is exactly `name`
//! * `prefix*` - ignore entries whose basename starts with `prefix`
//! * `*suffix` - ignore entries whose basename ends with `suffix`
//! * `*part*` - ignore entries whose basename contains `part`
//! * `/path` - ignore the entry at `root/path`
//! * `/path*` - ignore everything whose absolute path starts with `root/path`
//! * `!/path`, `!/path*` - force-include, overriding every ignore rule
//!
//! Rooted rules are resolved once, at load time, and are dropped when the
//! resolved path does not exist.
//!
//! # Example
//!
//! ```rust,ignore
//! use dirsync_rules::RuleSet;
//!
//! let rules = RuleSet::load(source_root, Path::new(".syncignore"), &sink);
//! if !rules.is_ignored(&path, None) {
//!     // copy it
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod parse;
mod rule_set;

pub use error::RuleError;
pub use rule_set::{DEFAULT_IGNORE_FILE, RuleSet};
