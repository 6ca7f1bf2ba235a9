//! Bounded worker pool for fire-and-forget work.
//!
//! Backed by a dedicated tokio runtime whose blocking pool is capped at the
//! configured worker count. Submitted closures run off the caller's thread with
//! no ordering between separate submissions and no result channel.
//!
//! The pool must be shut down (or dropped) outside of any async context.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tokio::runtime::{Builder, Handle, Runtime};

use pushroute_core::error::{PushError, Result};

use crate::config::ExecutorSection;

const DRAIN_POLL: Duration = Duration::from_millis(5);

pub struct TaskPool {
    handle: Handle,
    runtime: Mutex<Option<Runtime>>,
    closed: AtomicBool,
    pending: Arc<AtomicUsize>,
    workers: usize,
}

/// Decrements the pending count even if the task panics.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl TaskPool {
    pub fn new(cfg: &ExecutorSection) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(cfg.workers)
            .thread_name(cfg.thread_name.clone())
            .build()
            .map_err(|e| PushError::Internal(format!("worker pool start failed: {e}")))?;

        tracing::debug!(workers = cfg.workers, "worker pool started");
        Ok(Self {
            handle: runtime.handle().clone(),
            runtime: Mutex::new(Some(runtime)),
            closed: AtomicBool::new(false),
            pending: Arc::new(AtomicUsize::new(0)),
            workers: cfg.workers,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Submitted units not yet finished.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Submit a unit of work. Fails only after shutdown.
    pub fn run_async<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.closed.load(Ordering::Acquire) {
            return Err(PushError::Internal("worker pool is shut down".into()));
        }
        self.pending.fetch_add(1, Ordering::AcqRel);
        let guard = PendingGuard(Arc::clone(&self.pending));
        drop(self.handle.spawn_blocking(move || {
            let _guard = guard;
            f();
        }));
        Ok(())
    }

    /// Stop accepting work, let queued work drain for up to `timeout`, then stop the runtime.
    pub fn shutdown(&self, timeout: Duration) {
        self.closed.store(true, Ordering::Release);

        let deadline = Instant::now() + timeout;
        while self.pending() > 0 && Instant::now() < deadline {
            thread::sleep(DRAIN_POLL);
        }
        let left = self.pending();
        if left > 0 {
            tracing::warn!(pending = left, "worker pool shutdown timed out");
        }

        let runtime = match self.runtime.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(runtime) = runtime {
            runtime.shutdown_timeout(deadline.saturating_duration_since(Instant::now()));
            tracing::debug!("worker pool stopped");
        }
    }
}
