//! Bounded worker pool for per-file pipelines.
//!
//! Files are independent, so each one is a task. Results come back in input
//! order regardless of scheduling. Cancellation is cooperative: a task checks
//! the token before it starts, and tasks already running finish normally.

use crate::error::{Error, Result};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that stops new tasks from starting.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct WorkerPool {
    pool: rayon::ThreadPool,
    cancel: CancelToken,
}

impl WorkerPool {
    /// Build a pool with `jobs` threads (`0` picks rayon's default).
    pub fn new(jobs: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("prosefmt-{i}"))
            .build()?;
        Ok(Self {
            pool,
            cancel: CancelToken::new(),
        })
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run `task` over every item and collect results in input order.
    ///
    /// The first error stops further tasks from being scheduled and is
    /// returned. Items skipped because of cancellation yield
    /// [`Error::Cancelled`].
    pub fn run<T, R, F>(&self, items: &[T], task: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Result<R> + Sync,
    {
        let cancel = &self.cancel;
        self.pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    if cancel.is_cancelled() {
                        return Err(Error::Cancelled);
                    }
                    task(item)
                })
                .collect()
        })
    }
}
