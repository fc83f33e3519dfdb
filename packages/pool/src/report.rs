//! Per-worker and pool-wide counters.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Counters owned by a single worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Tasks that returned successfully.
    pub succeeded: u64,
    /// Tasks that returned an error or panicked.
    pub failed: u64,
    /// Sum of the unit counts returned by successful tasks.
    pub units: u64,
}

/// Totals collected once every worker has stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReport {
    /// Tasks accepted by `submit`.
    pub submitted: u64,
    /// Tasks that returned successfully.
    pub succeeded: u64,
    /// Tasks that returned an error or panicked.
    pub failed: u64,
    /// Sum of the unit counts returned by successful tasks.
    pub units: u64,
    /// Final counters of each worker, in spawn order.
    pub workers: Vec<WorkerStats>,
}

impl PoolReport {
    pub(crate) fn new(submitted: u64) -> Self {
        Self {
            submitted,
            ..Self::default()
        }
    }

    pub(crate) fn add_worker(&mut self, stats: WorkerStats) {
        self.succeeded += stats.succeeded;
        self.failed += stats.failed;
        self.units += stats.units;
        self.workers.push(stats);
    }

    /// Whether every submitted task has been accounted for.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.submitted == self.succeeded + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_worker_sums() {
        let mut report = PoolReport::new(5);
        report.add_worker(WorkerStats {
            succeeded: 2,
            failed: 1,
            units: 2,
        });
        report.add_worker(WorkerStats {
            succeeded: 2,
            failed: 0,
            units: 1,
        });

        assert_eq!(report.succeeded, 4);
        assert_eq!(report.failed, 1);
        assert_eq!(report.units, 3);
        assert_eq!(report.workers.len(), 2);
        assert!(report.is_balanced());
    }
}
