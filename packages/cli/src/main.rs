//! dirsync CLI entry point.
//!
//! Mirrors a source directory into a target directory, skipping ignored
//! paths and copying only files whose content changed.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod interactive;
mod output;

use std::env;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use args::Args;
use dirsync_config::{Config, discover_config, load_config};
use dirsync_engine::sync_dirs;
use dirsync_log::{FileSink, LevelFilter, LogCrateSink, LogSink, TeeSink};

fn main() {
    let args = Args::parse();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Set up logging
    if config.debug {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    } else if env::var_os("RUST_LOG").is_none() {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "info");
        }
    }
    pretty_env_logger::init();
    log::debug!("Resolved config: {config:?}");

    match run(&config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Merge defaults, the config file and the command line.
fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let config_path = match &args.config {
        Some(path) => Some(path.clone()),
        None => discover_config(&env::current_dir()?),
    };

    let file_layer = config_path.map(|path| load_config(&path)).transpose()?;

    Ok(Config::resolve(file_layer.as_ref(), &args.to_layer()))
}

/// Main application logic. Returns whether every copy succeeded.
fn run(config: &Config) -> Result<bool, Box<dyn std::error::Error>> {
    let (source, target) = config.roots()?;
    let options = config.sync_options();

    output::print_header("Directory Sync");
    output::print_plan(source, target, options.threads);

    if !config.assume_yes && !interactive::confirm_sync(source, target)? {
        output::print_cancelled();
        return Ok(true);
    }

    let sink = build_sink(config)?;
    let start = Instant::now();

    let report = sync_dirs(source, target, &options, sink)?;

    output::print_summary(&report, start.elapsed());
    Ok(!report.has_failures())
}

/// Console logging, teed into the configured log file when there is one.
fn build_sink(config: &Config) -> std::io::Result<Arc<dyn LogSink>> {
    let console: Arc<dyn LogSink> = Arc::new(LogCrateSink::new());

    let Some(path) = &config.log_file else {
        return Ok(console);
    };

    let level = if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let file: Arc<dyn LogSink> = Arc::new(FileSink::create(path, level)?);
    log::debug!("Writing log file {}", path.display());

    Ok(Arc::new(TeeSink::new(vec![console, file])))
}
