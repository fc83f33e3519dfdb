//! Worker pool implementation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use dirsync_log::LogSink;

use crate::error::PoolError;
use crate::report::{PoolReport, WorkerStats};

/// Error returned by a failing task.
pub type TaskError = Box<dyn std::error::Error + Send + Sync>;

/// A queued unit of work returning the number of units it processed.
pub type Job = Box<dyn FnOnce() -> Result<u64, TaskError> + Send + 'static>;

struct Worker {
    id: usize,
    busy: Arc<AtomicBool>,
    handle: Option<JoinHandle<WorkerStats>>,
}

/// A fixed set of worker threads consuming jobs from a shared queue.
///
/// The pool is single-use: [`drain_and_stop`](Self::drain_and_stop) consumes
/// it. Dropping an undrained pool still waits for queued jobs to finish.
pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<Worker>,
    submitted: AtomicU64,
    sink: Arc<dyn LogSink>,
}

impl WorkerPool {
    /// Spawn a pool of `size` workers. A size of zero is treated as one.
    ///
    /// # Errors
    ///
    /// * If a worker thread cannot be spawned
    pub fn new(size: usize, sink: Arc<dyn LogSink>) -> Result<Self, PoolError> {
        let size = size.max(1);
        let (sender, receiver) = crossbeam_channel::unbounded::<Job>();

        let mut pool = Self {
            sender: Some(sender),
            workers: Vec::with_capacity(size),
            submitted: AtomicU64::new(0),
            sink,
        };

        for id in 0..size {
            let busy = Arc::new(AtomicBool::new(false));
            let receiver = receiver.clone();
            let worker_busy = Arc::clone(&busy);
            let sink = Arc::clone(&pool.sink);

            let handle = thread::Builder::new()
                .name(format!("dirsync-worker-{id}"))
                .spawn(move || run_worker(id, &receiver, &worker_busy, sink.as_ref()))
                .map_err(|e| PoolError::SpawnError {
                    index: id,
                    source: e,
                })?;

            pool.workers.push(Worker {
                id,
                busy,
                handle: Some(handle),
            });
        }

        pool.sink
            .debug(&format!("Started worker pool with {size} workers"));

        Ok(pool)
    }

    /// Queue a task. Never blocks.
    ///
    /// The task's `Ok` value is added to the executing worker's unit count;
    /// an `Err` is logged and counted as a failure.
    ///
    /// # Errors
    ///
    /// * If the queue has been closed
    pub fn submit<F, E>(&self, task: F) -> Result<(), PoolError>
    where
        F: FnOnce() -> Result<u64, E> + Send + 'static,
        E: Into<TaskError>,
    {
        let job: Job = Box::new(move || -> Result<u64, TaskError> { task().map_err(Into::into) });

        self.sender
            .as_ref()
            .ok_or(PoolError::Closed)?
            .send(job)
            .map_err(|_| PoolError::Closed)?;

        self.submitted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Number of workers.
    #[must_use]
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Number of tasks accepted so far.
    #[must_use]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::SeqCst)
    }

    /// Number of workers currently executing a task.
    #[must_use]
    pub fn busy_workers(&self) -> usize {
        self.workers
            .iter()
            .filter(|w| w.busy.load(Ordering::SeqCst))
            .count()
    }

    /// Wait for every queued task to finish, stop the workers and return the
    /// aggregated counters.
    #[must_use]
    pub fn drain_and_stop(mut self) -> PoolReport {
        let report = self.shutdown();
        self.sink.info(&format!(
            "Total tasks: {}, succeeded: {}, failed: {}",
            report.submitted, report.succeeded, report.failed
        ));
        report
    }

    fn shutdown(&mut self) -> PoolReport {
        // Closing the channel lets workers drain what is left and then exit.
        drop(self.sender.take());

        let mut report = PoolReport::new(self.submitted.load(Ordering::SeqCst));
        for worker in &mut self.workers {
            let Some(handle) = worker.handle.take() else {
                continue;
            };
            match handle.join() {
                Ok(stats) => report.add_worker(stats),
                Err(_) => self
                    .sink
                    .error(&format!("Worker {} exited abnormally", worker.id)),
            }
        }
        report
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if self.sender.is_some() {
            let _ = self.shutdown();
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.workers.len())
            .field("submitted", &self.submitted())
            .field("open", &self.sender.is_some())
            .finish_non_exhaustive()
    }
}

fn run_worker(
    id: usize,
    receiver: &Receiver<Job>,
    busy: &AtomicBool,
    sink: &dyn LogSink,
) -> WorkerStats {
    let mut stats = WorkerStats::default();

    // Blocks until a job arrives; ends once the queue is closed and empty.
    for job in receiver {
        busy.store(true, Ordering::SeqCst);

        match panic::catch_unwind(AssertUnwindSafe(job)) {
            Ok(Ok(units)) => {
                stats.succeeded += 1;
                stats.units += units;
            }
            Ok(Err(e)) => {
                stats.failed += 1;
                sink.error(&format!("[task failed] worker {id}: {e}"));
            }
            Err(payload) => {
                stats.failed += 1;
                sink.error(&format!(
                    "[task panicked] worker {id}: {}",
                    panic_message(payload.as_ref())
                ));
            }
        }

        busy.store(false, Ordering::SeqCst);
    }

    stats
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
