//! Manager - competes for jobs and runs them on its own worker pool.
//!
//! # Request loop
//! At most one per manager. While the source reports jobs, the loop applies
//! for as many jobs as it has idle workers. The source may answer by calling
//! `assign_jobs` from inside `submit_job_application`, or hand out nothing
//! when another manager won the race. With no idle workers the loop waits for
//! a completion instead of spinning.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;

use super::status::ManagerReport;
use super::worker_pool::WorkerPool;
use crate::domain::{Job, JobApplication, ManagerId};
use crate::ports::{JobApplicant, JobListener, JobSource};

pub struct Manager {
    id: ManagerId,
    pool: WorkerPool,
    request_loop_running: AtomicBool,
    me: Weak<Manager>,
}

impl Manager {
    /// Create a manager and start its `capacity` workers.
    ///
    /// # Panics
    /// Outside a tokio runtime.
    pub fn new(id: ManagerId, capacity: usize) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            id,
            pool: WorkerPool::spawn(id, capacity),
            request_loop_running: AtomicBool::new(false),
            me: me.clone(),
        })
    }

    pub fn id(&self) -> ManagerId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn completed_count(&self) -> u64 {
        self.pool.completed_count()
    }

    pub fn is_requesting(&self) -> bool {
        self.request_loop_running.load(Ordering::Acquire)
    }

    pub fn report(&self) -> ManagerReport {
        ManagerReport {
            manager_id: self.id,
            capacity: self.pool.capacity(),
            active: self.pool.active_count(),
            completed: self.pool.completed_count(),
        }
    }

    /// Start a request loop against `source` unless one is already running.
    /// Returns immediately; the loop runs on its own task.
    pub fn notify(&self, source: Arc<dyn JobSource>) {
        if !self.try_claim_request_loop() {
            tracing::debug!(manager = %self.id, "request loop already running");
            return;
        }
        let Some(me) = self.me.upgrade() else {
            self.request_loop_running.store(false, Ordering::Release);
            return;
        };
        tokio::spawn(me.request_loop(source));
    }

    fn try_claim_request_loop(&self) -> bool {
        self.request_loop_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Build an application for `requested` jobs on behalf of this manager.
    pub fn application(&self, requested: i64) -> JobApplication {
        let me: Weak<dyn JobApplicant> = self.me.clone();
        JobApplication::new(me, requested)
    }

    async fn request_loop(self: Arc<Self>, source: Arc<dyn JobSource>) {
        loop {
            self.apply_while_jobs_remain(source.as_ref()).await;
            self.request_loop_running.store(false, Ordering::Release);

            // A notification that arrived while we were finishing saw the
            // flag still set and backed off, so look once more.
            if !source.has_jobs_available() || !self.try_claim_request_loop() {
                break;
            }
        }
    }

    async fn apply_while_jobs_remain(&self, source: &dyn JobSource) {
        while source.has_jobs_available() {
            let idle = self.pool.idle_count();
            if idle == 0 {
                self.pool.wait_for_idle_worker().await;
                continue;
            }

            tracing::info!(manager = %self.id, requested = idle, "requesting jobs");
            let application = self.application(i64::try_from(idle).unwrap_or(i64::MAX));
            source.submit_job_application(application);

            // let the workers pick up what we just got before sizing the next request
            tokio::task::yield_now().await;
        }
    }
}

impl JobApplicant for Manager {
    fn assign_jobs(&self, jobs: Vec<Job>) {
        tracing::info!(manager = %self.id, assigned = jobs.len(), "jobs assigned");
        for job in jobs {
            self.pool.execute(job);
        }
    }
}

#[async_trait]
impl JobListener for Manager {
    async fn new_jobs_available(&self, source: Arc<dyn JobSource>) {
        self.notify(source);
    }
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
