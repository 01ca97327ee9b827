//! Background task execution.
//!
//! A small fixed pool of worker threads runs blocking work (favicon
//! downloads) off the main thread. Completion callbacks are queued and only
//! run when the owner calls [`BackgroundExecutor::process_results`], so the
//! scene model is only ever touched from the main loop.

use crate::constants::DEFAULT_BACKGROUND_WORKERS;
use parking_lot::Mutex;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use tracing::{debug, error, warn};

/// Outcome of a background task
pub type TaskResult<T> = Result<T, String>;

type Job = Box<dyn FnOnce() + Send + 'static>;
type Completion = Box<dyn FnOnce() + Send + 'static>;

pub struct BackgroundExecutor {
    jobs: Option<Sender<Job>>,
    completions_tx: Sender<Completion>,
    completions_rx: Receiver<Completion>,
    pending: Arc<AtomicUsize>,
    workers: Vec<JoinHandle<()>>,
}

impl BackgroundExecutor {
    /// Start `workers` threads (at least one).
    pub fn new(workers: usize) -> Self {
        let (jobs_tx, jobs_rx) = mpsc::channel::<Job>();
        let (completions_tx, completions_rx) = mpsc::channel();
        let jobs_rx = Arc::new(Mutex::new(jobs_rx));

        let workers = (0..workers.max(1))
            .filter_map(|i| {
                let rx = Arc::clone(&jobs_rx);
                std::thread::Builder::new()
                    .name(format!("pinboard-worker-{i}"))
                    .spawn(move || {
                        loop {
                            // Hold the lock only while waiting for the next job
                            let job = rx.lock().recv();
                            match job {
                                Ok(job) => job(),
                                Err(_) => break,
                            }
                        }
                    })
                    .map_err(|e| error!("Failed to start background worker: {}", e))
                    .ok()
            })
            .collect();

        Self {
            jobs: Some(jobs_tx),
            completions_tx,
            completions_rx,
            pending: Arc::new(AtomicUsize::new(0)),
            workers,
        }
    }

    pub fn with_default_workers() -> Self {
        Self::new(DEFAULT_BACKGROUND_WORKERS)
    }

    /// Run `work` on a worker; `callback` runs later on the thread calling
    /// `process_results`. A panicking task reports an error instead.
    pub fn spawn<T, W, C>(&self, name: &str, work: W, callback: C)
    where
        T: Send + 'static,
        W: FnOnce() -> TaskResult<T> + Send + 'static,
        C: FnOnce(TaskResult<T>) + Send + 'static,
    {
        let Some(jobs) = self.jobs.as_ref() else {
            warn!(task = name, "Executor shut down, dropping task");
            return;
        };

        let name = name.to_string();
        let completions = self.completions_tx.clone();
        let pending = Arc::clone(&self.pending);
        pending.fetch_add(1, Ordering::SeqCst);

        let job: Job = Box::new(move || {
            let result = catch_unwind(AssertUnwindSafe(work))
                .unwrap_or_else(|_| Err(format!("task '{name}' panicked")));
            if let Err(e) = &result {
                debug!(task = %name, "Background task failed: {}", e);
            }
            let completion: Completion = Box::new(move || callback(result));
            if completions.send(completion).is_err() {
                pending.fetch_sub(1, Ordering::SeqCst);
            }
        });

        if jobs.send(job).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            warn!("No background workers available");
        }
    }

    /// Run every completion callback that is ready. Returns how many ran.
    pub fn process_results(&self) -> usize {
        let mut ran = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            completion();
            self.pending.fetch_sub(1, Ordering::SeqCst);
            ran += 1;
        }
        ran
    }

    /// Tasks spawned whose callbacks have not run yet
    pub fn pending_count(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }
}

impl Default for BackgroundExecutor {
    fn default() -> Self {
        Self::with_default_workers()
    }
}

impl Drop for BackgroundExecutor {
    fn drop(&mut self) {
        // Closing the job channel lets idle workers exit
        self.jobs.take();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                warn!("Background worker panicked");
            }
        }
    }
}
