//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::Parser;
use dirsync_config::ConfigLayer;

/// CLI arguments for dirsync.
#[derive(Debug, Parser)]
#[command(
    name = "dirsync",
    about = "Mirror a directory tree into another, copying only changed files",
    version
)]
pub struct Args {
    /// Directory to copy from.
    #[arg(index = 1)]
    pub source: Option<PathBuf>,

    /// Directory to copy into.
    #[arg(index = 2)]
    pub target: Option<PathBuf>,

    /// Configuration file (defaults to dirsync.toml or dirsync.json in the
    /// current directory).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of copy worker threads.
    #[arg(long, short = 'j', value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: Option<u16>,

    /// Ignore file to load rules from.
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,

    /// Also write log records to this file (truncated on each run).
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Copy on the walking thread instead of a worker pool.
    #[arg(long = "no-pool")]
    pub no_pool: bool,

    /// Do not ask for confirmation.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// The settings given on the command line, as the top config layer.
    ///
    /// Flags that were not passed stay unset so file values show through.
    #[must_use]
    pub fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            source: self.source.clone(),
            target: self.target.clone(),
            threads: self.threads.map(usize::from),
            inline: self.no_pool.then_some(true),
            debug: self.verbose.then_some(true),
            ignore_file: self.ignore_file.clone(),
            log_file: self.log_file.clone(),
            assume_yes: self.yes.then_some(true),
        }
    }
}
