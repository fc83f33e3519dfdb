//! The unit of copy work.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use dirsync_copy::{CopyError, CopyOutcome, copy_if_changed};
use dirsync_log::LogSink;

/// Copy `source` over `target` if their contents differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTask {
    source: PathBuf,
    target: PathBuf,
}

impl CopyTask {
    /// Create a task for one file.
    #[must_use]
    pub fn new(source: &Path, target: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
        }
    }

    /// Run the task, returning the number of files copied (0 or 1).
    ///
    /// # Errors
    ///
    /// * If hashing leaves the outcome undecided and the copy then fails
    /// * If the copy itself fails
    pub fn run(&self, sink: &dyn LogSink) -> Result<u64, CopyError> {
        let outcome = copy_if_changed(&self.source, &self.target)?;
        if outcome == CopyOutcome::Copied {
            sink.info(&format!(
                "[copy] {} -> {}",
                self.source.display(),
                self.target.display()
            ));
        }
        Ok(outcome.units())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirsync_log::{Level, MemorySink};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_copies_and_logs() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.txt");
        let target = dir.path().join("b.txt");
        fs::write(&source, "hi").unwrap();
        let sink = MemorySink::new();

        let task = CopyTask::new(&source, &target);

        assert_eq!(task.run(&sink).unwrap(), 1);
        assert!(sink.contains(Level::Info, "[copy]"));
        assert_eq!(task.run(&sink).unwrap(), 0);
        assert_eq!(sink.messages_at(Level::Info).len(), 1);
    }
}
