//! Tree walk and sync orchestration.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dirsync_log::LogSink;
use dirsync_pool::WorkerPool;
use dirsync_rules::{DEFAULT_IGNORE_FILE, RuleSet};
use path_clean::PathClean;
use walkdir::{DirEntry, WalkDir};

use crate::error::SyncError;
use crate::report::SyncReport;
use crate::task::CopyTask;

/// Worker count used when none is configured.
pub const DEFAULT_THREADS: usize = 10;

/// Options for [`sync_dirs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Worker threads for copying. `None` copies inline on the walking thread.
    pub threads: Option<usize>,
    /// Ignore file to load rules from.
    pub ignore_file: PathBuf,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            threads: Some(DEFAULT_THREADS),
            ignore_file: PathBuf::from(DEFAULT_IGNORE_FILE),
        }
    }
}

/// Mirror `source` into `target` with a fresh rule set and pool.
///
/// # Errors
///
/// * If the worker pool cannot be started
/// * If the source root is missing or the target lies inside it
pub fn sync_dirs(
    source: &Path,
    target: &Path,
    options: &SyncOptions,
    sink: Arc<dyn LogSink>,
) -> Result<SyncReport, SyncError> {
    let mut engine = SyncEngine::new(source, &options.ignore_file, Arc::clone(&sink));
    if let Some(threads) = options.threads {
        engine = engine.with_pool(WorkerPool::new(threads, sink)?);
    }
    engine.sync(target)
}

/// A single sync run: a source root, its rules, and an optional pool.
///
/// The engine is consumed by [`sync`](Self::sync); build a new one per run.
pub struct SyncEngine {
    source_root: PathBuf,
    rules: RuleSet,
    pool: Option<WorkerPool>,
    sink: Arc<dyn LogSink>,
}

impl SyncEngine {
    /// Create an engine for `source_root`, loading rules from `ignore_file`.
    #[must_use]
    pub fn new(source_root: &Path, ignore_file: &Path, sink: Arc<dyn LogSink>) -> Self {
        let rules = RuleSet::load(source_root, ignore_file, sink.as_ref());
        Self::with_rules(source_root, rules, sink)
    }

    /// Create an engine with an already-built rule set.
    #[must_use]
    pub fn with_rules(source_root: &Path, rules: RuleSet, sink: Arc<dyn LogSink>) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            rules,
            pool: None,
            sink,
        }
    }

    /// Hand file copies to `pool` instead of copying inline.
    #[must_use]
    pub fn with_pool(mut self, pool: WorkerPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Mirror the source root into `target_root`.
    ///
    /// When a pool is attached, the returned `copied` count comes from the
    /// drained pool; otherwise it is the walk's own sum.
    ///
    /// # Errors
    ///
    /// * If the source root does not exist
    /// * If `target_root` is inside the source root and not ignored
    /// * If either root cannot be resolved
    pub fn sync(mut self, target_root: &Path) -> Result<SyncReport, SyncError> {
        let source_root = self.source_root.clone();

        if !source_root.exists() {
            return Err(SyncError::SourceMissing(source_root));
        }
        self.check_target(target_root)?;

        self.sink.info(&format!(
            "Syncing {} -> {}",
            source_root.display(),
            target_root.display()
        ));

        let mut report = SyncReport::default();
        let walked = self.walk(&source_root, target_root, &mut report);

        match self.pool.take() {
            Some(pool) => report.absorb_pool(&pool.drain_and_stop()),
            None => report.copied = walked,
        }

        self.sink.info(&format!(
            "Sync finished: {} copied, {} failed, {} directories created, {} ignored",
            report.copied, report.failed, report.dirs_created, report.ignored
        ));

        Ok(report)
    }

    /// Pre-order walk of the source. A symlinked root is followed; every
    /// symlink below it is skipped.
    fn walk(&self, source_root: &Path, target_root: &Path, report: &mut SyncReport) -> u64 {
        let mut entries = WalkDir::new(source_root)
            .follow_root_links(true)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        let mut copied = 0;

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.sink.error(&format!("[walk] {e}"));
                    report.walk_errors += 1;
                    continue;
                }
            };

            let file_type = entry.file_type();

            if self.is_pruned(&entry) {
                report.ignored += 1;
                if file_type.is_dir() {
                    entries.skip_current_dir();
                }
                continue;
            }

            let target = match entry.path().strip_prefix(source_root) {
                Ok(relative) if entry.depth() > 0 => target_root.join(relative),
                _ => target_root.to_path_buf(),
            };

            if file_type.is_symlink() {
                self.sink
                    .debug(&format!("[skip symlink] {}", entry.path().display()));
                report.skipped += 1;
            } else if file_type.is_file() {
                copied += self.copy_file(entry.path(), &target, report);
            } else if file_type.is_dir() {
                if !self.ensure_dir(&target, report) {
                    entries.skip_current_dir();
                }
            } else {
                self.sink
                    .debug(&format!("[skip special] {}", entry.path().display()));
                report.skipped += 1;
            }
        }

        copied
    }

    /// Whether the rules drop `entry`. A directory root is never matched.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        let ignored = if entry.depth() == 0 {
            entry.file_type().is_file() && self.rules.is_ignored(entry.path(), None)
        } else {
            let name = entry.file_name().to_string_lossy();
            self.rules.is_ignored(entry.path(), Some(&*name))
        };

        if ignored {
            self.sink
                .debug(&format!("[ignore] {}", entry.path().display()));
        }
        ignored
    }

    /// Make sure `target` is a directory. Returns `false` when its subtree
    /// has to be skipped.
    fn ensure_dir(&self, target: &Path, report: &mut SyncReport) -> bool {
        if target.is_dir() {
            return true;
        }

        if target.exists() {
            self.sink.error(&format!(
                "[walk] target {} exists and is not a directory",
                target.display()
            ));
            report.walk_errors += 1;
            return false;
        }

        if let Err(e) = fs::create_dir_all(target) {
            self.sink.error(&format!(
                "[walk] cannot create directory {}: {e}",
                target.display()
            ));
            report.walk_errors += 1;
            return false;
        }

        self.sink.info(&format!("[mkdir] {}", target.display()));
        report.dirs_created += 1;
        true
    }

    fn copy_file(&self, source: &Path, target: &Path, report: &mut SyncReport) -> u64 {
        let task = CopyTask::new(source, target);

        let Some(pool) = &self.pool else {
            report.tasks += 1;
            return match task.run(self.sink.as_ref()) {
                Ok(units) => {
                    report.succeeded += 1;
                    units
                }
                Err(e) => {
                    self.sink.error(&format!("[task failed] {e}"));
                    report.failed += 1;
                    0
                }
            };
        };

        // Queued tasks are tallied from the pool report after draining.
        let sink = Arc::clone(&self.sink);
        if let Err(e) = pool.submit(move || task.run(sink.as_ref())) {
            self.sink
                .error(&format!("[task failed] {}: {e}", source.display()));
            report.tasks += 1;
            report.failed += 1;
        }
        0
    }

    /// Reject a target inside the source unless the walk would prune it.
    fn check_target(&self, target_root: &Path) -> Result<(), SyncError> {
        let source = resolve(&self.source_root)?;
        let target = resolve(target_root)?;

        let Ok(relative) = target.strip_prefix(&source) else {
            return Ok(());
        };
        if relative.as_os_str().is_empty() {
            return Ok(());
        }

        if self.prunes_below_root(relative) {
            self.sink.debug(&format!(
                "Target {} is inside the source but ignored",
                target.display()
            ));
            return Ok(());
        }

        Err(SyncError::TargetInsideSource {
            source_root: source,
            target_root: target,
        })
    }

    /// Whether the rules drop `relative`, or any of its ancestors, below the
    /// source root.
    fn prunes_below_root(&self, relative: &Path) -> bool {
        // Rule paths are built from the root as given, not its canonical form.
        let mut current = std::path::absolute(&self.source_root)
            .map_or_else(|_| self.source_root.clone(), |p| p.clean());

        relative.components().any(|component| {
            current.push(component);
            let name = component.as_os_str().to_string_lossy();
            self.rules.is_ignored(&current, Some(&*name))
        })
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("source_root", &self.source_root)
            .field("rules", &self.rules)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

/// Absolute form of `path` with symlinks resolved through its longest
/// existing ancestor.
fn resolve(path: &Path) -> Result<PathBuf, SyncError> {
    let resolve_error = |e| SyncError::ResolveError {
        path: path.to_path_buf(),
        io_error: e,
    };

    let absolute = std::path::absolute(path).map_err(resolve_error)?.clean();

    let Some(existing) = absolute
        .ancestors()
        .find(|ancestor| ancestor.exists())
        .map(Path::to_path_buf)
    else {
        return Ok(absolute);
    };

    let mut resolved = fs::canonicalize(&existing).map_err(resolve_error)?;
    let rest = absolute.strip_prefix(&existing).unwrap_or(Path::new(""));
    if !rest.as_os_str().is_empty() {
        resolved.push(rest);
    }
    Ok(resolved)
}
