//! End-to-end sync scenarios, run both inline and through the worker pool.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use dirsync_copy::digest;
use dirsync_engine::{SyncOptions, SyncReport, sync_dirs};
use dirsync_log::{Level, LogSink, MemorySink};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    source: PathBuf,
    target: PathBuf,
    ignore_file: PathBuf,
}

impl Fixture {
    fn new(ignore: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        let target = dir.path().join("target");
        let ignore_file = dir.path().join(".syncignore");
        fs::create_dir_all(&source).unwrap();
        fs::write(&ignore_file, ignore).unwrap();
        Self {
            _dir: dir,
            source,
            target,
            ignore_file,
        }
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.source.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn sync(&self, threads: Option<usize>) -> (SyncReport, Arc<MemorySink>) {
        let memory = Arc::new(MemorySink::new());
        let sink: Arc<dyn LogSink> = memory.clone();
        let options = SyncOptions {
            threads,
            ignore_file: self.ignore_file.clone(),
        };
        let report = sync_dirs(&self.source, &self.target, &options, sink).unwrap();
        (report, memory)
    }
}

const MODES: [Option<usize>; 4] = [None, Some(1), Some(2), Some(10)];

fn mtimes(root: &Path) -> Vec<(PathBuf, SystemTime)> {
    let mut out = Vec::new();
    for entry in fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        out.push((path.clone(), fs::metadata(&path).unwrap().modified().unwrap()));
        if path.is_dir() {
            out.extend(mtimes(&path));
        }
    }
    out.sort();
    out
}

#[test]
fn test_ignored_child_still_creates_parent_dir() {
    for mode in MODES {
        let fx = Fixture::new("b.txt\n");
        fx.write("a.txt", "hi");
        fx.write("sub/b.txt", "bye");

        let (report, _) = fx.sync(mode);

        assert_eq!(report.copied, 1, "mode {mode:?}");
        assert_eq!(fs::read_to_string(fx.target.join("a.txt")).unwrap(), "hi");
        assert!(fx.target.join("sub").is_dir());
        assert!(!fx.target.join("sub/b.txt").exists());
        assert_eq!(report.ignored, 1);
    }
}

#[test]
fn test_identical_trees_copy_nothing() {
    for mode in MODES {
        let fx = Fixture::new("");
        fx.write("a.txt", "hi");
        fx.write("sub/deeper/b.txt", "bye");
        fx.sync(mode);
        let before = mtimes(&fx.target);

        let (report, memory) = fx.sync(mode);

        assert_eq!(report.copied, 0, "mode {mode:?}");
        assert_eq!(report.dirs_created, 0);
        assert_eq!(report.failed, 0);
        assert_eq!(mtimes(&fx.target), before);
        assert!(!memory.contains(Level::Info, "[copy]"));
        assert!(!memory.contains(Level::Info, "[mkdir]"));
    }
}

#[test]
fn test_suffix_rule_filters_files() {
    for mode in MODES {
        let fx = Fixture::new("*.tmp\n");
        fx.write("x.tmp", "scratch");
        fx.write("x.txt", "keep");

        let (report, _) = fx.sync(mode);

        assert_eq!(report.copied, 1, "mode {mode:?}");
        assert!(fx.target.join("x.txt").exists());
        assert!(!fx.target.join("x.tmp").exists());
    }
}

#[test]
fn test_missing_files_are_copied_with_matching_digests() {
    for mode in MODES {
        let fx = Fixture::new("");
        let files = ["one.txt", "two/two.txt", "two/three/three.txt", "four.bin"];
        for (i, name) in files.iter().enumerate() {
            fx.write(name, &"x".repeat(i * 1000 + 1));
        }

        let (report, _) = fx.sync(mode);

        assert_eq!(report.copied, files.len() as u64, "mode {mode:?}");
        for name in files {
            assert_eq!(
                digest(&fx.source.join(name)).unwrap(),
                digest(&fx.target.join(name)).unwrap()
            );
        }
    }
}

#[test]
fn test_only_changed_files_are_recopied() {
    for mode in MODES {
        let fx = Fixture::new("");
        fx.write("same.txt", "same");
        fx.write("changed.txt", "v1");
        fx.sync(mode);

        fx.write("changed.txt", "v2");
        let (report, _) = fx.sync(mode);

        assert_eq!(report.copied, 1, "mode {mode:?}");
        assert_eq!(fs::read_to_string(fx.target.join("changed.txt")).unwrap(), "v2");
    }
}

#[test]
fn test_target_extras_are_never_deleted() {
    let fx = Fixture::new("");
    fx.write("a.txt", "hi");
    fs::create_dir_all(&fx.target).unwrap();
    fs::write(fx.target.join("extra.txt"), "mine").unwrap();

    fx.sync(Some(2));

    assert_eq!(fs::read_to_string(fx.target.join("extra.txt")).unwrap(), "mine");
}

#[test]
fn test_deep_tree_dirs_exist_before_tasks_run() {
    let fx = Fixture::new("");
    for d in 0..8 {
        let mut dir = String::new();
        for level in 0..6 {
            dir.push_str(&format!("d{d}_{level}/"));
            fx.write(&format!("{dir}file.txt"), &format!("{d}-{level}"));
        }
    }

    let (report, memory) = fx.sync(Some(10));

    assert_eq!(report.copied, 48);
    assert_eq!(report.failed, 0);
    assert_eq!(report.tasks, report.succeeded + report.failed);
    assert!(memory.messages_at(Level::Error).is_empty());
}

#[test]
fn test_include_rule_overrides_name_rule() {
    let fx = Fixture::new("");
    fx.write("build/out/app.bin", "app");
    fx.write("build/other.bin", "other");
    fs::write(&fx.ignore_file, "*.bin\n!/build/out*\n").unwrap();

    let (report, _) = fx.sync(Some(2));

    assert_eq!(report.copied, 1);
    assert!(fx.target.join("build/out/app.bin").exists());
    assert!(!fx.target.join("build/other.bin").exists());
}

#[test]
fn test_ignored_directory_prunes_its_subtree() {
    let fx = Fixture::new("");
    fx.write("build/out/app.bin", "app");
    fx.write("keep.txt", "keep");
    fs::write(&fx.ignore_file, "/build*\n!/build/out*\n").unwrap();

    let (report, _) = fx.sync(None);

    // The include rule only covers build/out; build itself is pruned first.
    assert_eq!(report.copied, 1);
    assert!(!fx.target.join("build").exists());
}

#[test]
fn test_failed_copies_are_counted_not_fatal() {
    for mode in MODES {
        let fx = Fixture::new("");
        fx.write("a.txt", "a");
        fx.write("b.txt", "b");
        fx.write("c.txt", "c");
        fs::create_dir_all(fx.target.join("b.txt")).unwrap();

        let (report, memory) = fx.sync(mode);

        assert_eq!(report.copied, 2, "mode {mode:?}");
        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.tasks, 3);
        assert!(report.has_failures());
        assert!(memory.contains(Level::Error, "b.txt"));
    }
}

#[test]
fn test_missing_ignore_file_syncs_everything() {
    let fx = Fixture::new("");
    fs::remove_file(&fx.ignore_file).unwrap();
    fx.write("a.tmp", "a");

    let (report, memory) = fx.sync(None);

    assert_eq!(report.copied, 1);
    assert!(memory.messages_at(Level::Error).is_empty());
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_only_loses_its_subtree() {
    for mode in MODES {
        let fx = Fixture::new("");
        fx.write("a.txt", "a");
        fx.write("locked/inner.txt", "x");
        fx.write("z/z.txt", "z");
        let locked = fx.source.join("locked");
        set_mode(&locked, 0o000);
        if fs::read_dir(&locked).is_ok() {
            // Permission bits do not bind this user (running as root).
            set_mode(&locked, 0o755);
            return;
        }

        let (report, memory) = fx.sync(mode);
        set_mode(&locked, 0o755);

        assert_eq!(report.copied, 2, "mode {mode:?}");
        assert_eq!(report.walk_errors, 1);
        assert_eq!(report.failed, 0);
        assert!(report.has_failures());
        assert!(memory.contains(Level::Error, "locked"));
        assert_eq!(fs::read_to_string(fx.target.join("z/z.txt")).unwrap(), "z");
        assert!(!fx.target.join("locked/inner.txt").exists());
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_source_file_is_a_failed_task() {
    for mode in MODES {
        let fx = Fixture::new("");
        fx.write("a.txt", "a");
        fx.write("secret.txt", "new");
        fs::create_dir_all(&fx.target).unwrap();
        fs::write(fx.target.join("secret.txt"), "old").unwrap();
        let secret = fx.source.join("secret.txt");
        set_mode(&secret, 0o000);
        if fs::read(&secret).is_ok() {
            set_mode(&secret, 0o644);
            return;
        }

        let (report, memory) = fx.sync(mode);
        set_mode(&secret, 0o644);

        assert_eq!(report.copied, 1, "mode {mode:?}");
        assert_eq!(report.tasks, 2);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert!(memory.contains(Level::Error, "secret.txt"));
        assert_eq!(fs::read_to_string(fx.target.join("a.txt")).unwrap(), "a");
    }
}
