//! Publisher - owns the job queue and the listener registry.
//!
//! # Flow
//! 1. `create_jobs(n)` appends n jobs and fans out one notification task per
//!    registered listener
//! 2. notified managers poll `has_jobs_available()` and submit applications
//! 3. `submit_job_application()` drains up to the requested count from the
//!    front of the queue under the queue lock, then hands the batch to the
//!    applicant
//!
//! Jobs leave the queue only inside that single locked drain, so a job is
//! handed to at most one applicant, and nothing else removes jobs.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::job_factory::JobFactory;
use crate::domain::{Job, JobApplication, JobFairError, Result};
use crate::ports::{JobListener, JobSource};

pub struct Publisher {
    queue: Mutex<VecDeque<Job>>,
    /// Queue length, refreshed under the queue lock; read without it.
    available: AtomicUsize,
    listeners: Mutex<Vec<Arc<dyn JobListener>>>,
    jobs: JobFactory,
    me: Weak<Publisher>,
}

// A panic in another task must not wedge the queue or the registry.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn same_listener(a: &Arc<dyn JobListener>, b: &Arc<dyn JobListener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl Publisher {
    pub fn new(jobs: JobFactory) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            queue: Mutex::new(VecDeque::new()),
            available: AtomicUsize::new(0),
            listeners: Mutex::new(Vec::new()),
            jobs,
            me: me.clone(),
        })
    }

    /// Queue `count` new jobs and notify every registered listener.
    ///
    /// Returns without waiting for any listener. Non-positive counts are
    /// refused and change nothing.
    ///
    /// # Panics
    /// Outside a tokio runtime, when there are listeners to notify.
    pub fn create_jobs(&self, count: i64) -> Result<usize> {
        if count <= 0 {
            return Err(JobFairError::InvalidJobCount(count));
        }
        let count = usize::try_from(count).map_err(|_| JobFairError::InvalidJobCount(count))?;

        tracing::info!(count, "creating new jobs");
        {
            let mut queue = lock(&self.queue);
            queue.extend((0..count).map(|_| self.jobs.create()));
            self.available.store(queue.len(), Ordering::Release);
        }

        self.notify_listeners(count);
        Ok(count)
    }

    fn notify_listeners(&self, count: usize) {
        let Some(publisher) = self.me.upgrade() else {
            return;
        };
        // snapshot so add/remove never races with the fan-out
        let listeners = lock(&self.listeners).clone();

        for listener in listeners {
            let source: Arc<dyn JobSource> = publisher.clone();
            tokio::spawn(async move {
                tracing::info!(listener = %listener, count, "notifying listener of new jobs");
                listener.new_jobs_available(source).await;
            });
        }
    }

    /// Returns `false` when the listener was already registered.
    pub fn add_job_listener(&self, listener: Arc<dyn JobListener>) -> bool {
        let mut listeners = lock(&self.listeners);
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Returns `false` when the listener was not registered.
    pub fn remove_job_listener(&self, listener: &Arc<dyn JobListener>) -> bool {
        let mut listeners = lock(&self.listeners);
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        listeners.len() != before
    }

    pub fn is_registered(&self, listener: &Arc<dyn JobListener>) -> bool {
        lock(&self.listeners)
            .iter()
            .any(|l| same_listener(l, listener))
    }

    /// Registered listeners, in registration order.
    pub fn listeners(&self) -> Vec<Arc<dyn JobListener>> {
        lock(&self.listeners).clone()
    }

    pub fn available_jobs(&self) -> usize {
        self.available.load(Ordering::Acquire)
    }
}

impl JobSource for Publisher {
    fn has_jobs_available(&self) -> bool {
        self.available_jobs() > 0
    }

    fn submit_job_application(&self, application: JobApplication) -> usize {
        let requested = application.requested();
        if requested <= 0 {
            tracing::debug!(requested, "ignoring application for no jobs");
            return 0;
        }
        let Some(applicant) = application.applicant() else {
            tracing::debug!("ignoring application from a dropped applicant");
            return 0;
        };
        let requested = usize::try_from(requested).unwrap_or(usize::MAX);

        let batch: Vec<Job> = {
            let mut queue = lock(&self.queue);
            let take = requested.min(queue.len());
            let batch = queue.drain(..take).collect();
            self.available.store(queue.len(), Ordering::Release);
            batch
        };

        if batch.is_empty() {
            return 0;
        }
        let assigned = batch.len();
        tracing::info!(applicant = %applicant, requested, assigned, "serving application");
        applicant.assign_jobs(batch);
        assigned
    }
}
