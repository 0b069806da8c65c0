//! WorkerPool - bounded concurrency with an unbounded FIFO backlog.
//!
//! # Flow
//! 1. `execute()` pushes the job onto an unbounded channel (never blocks)
//! 2. `capacity` worker tasks take jobs off the channel in order
//! 3. a worker bumps `active`, runs the job, then bumps `completed`
//!
//! Worker tasks exit once the pool is dropped and the backlog is empty.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tokio::sync::{Mutex, Notify, mpsc, watch};
use tracing::Instrument;

use crate::domain::{Job, ManagerId, RunOutcome};

#[derive(Default)]
struct PoolStats {
    active: AtomicUsize,
    completed: AtomicU64,
    /// Signalled (to all waiters) after every completion.
    finished: Notify,
}

pub struct WorkerPool {
    capacity: usize,
    backlog: mpsc::UnboundedSender<Job>,
    stats: Arc<PoolStats>,
    interrupt: watch::Sender<u64>,
}

impl WorkerPool {
    /// Spawn `capacity` workers on the current tokio runtime.
    ///
    /// # Panics
    /// Outside a tokio runtime.
    pub fn spawn(owner: ManagerId, capacity: usize) -> Self {
        let (backlog, rx) = mpsc::unbounded_channel();
        let rx = Arc::new(Mutex::new(rx));
        let stats = Arc::new(PoolStats::default());
        let (interrupt, _) = watch::channel(0u64);

        for index in 0..capacity {
            let span = tracing::info_span!("worker", manager = %owner, worker = index + 1);
            tokio::spawn(
                worker_loop(Arc::clone(&rx), Arc::clone(&stats), interrupt.subscribe())
                    .instrument(span),
            );
        }

        Self {
            capacity,
            backlog,
            stats,
            interrupt,
        }
    }

    /// Queue a job. Runs as soon as a worker is free.
    pub fn execute(&self, job: Job) {
        if let Err(mpsc::error::SendError(job)) = self.backlog.send(job) {
            // every worker is gone; nothing left to run it
            tracing::error!(job = %job, "worker pool is closed, dropping job");
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn active_count(&self) -> usize {
        self.stats.active.load(Ordering::Acquire)
    }

    pub fn idle_count(&self) -> usize {
        self.capacity.saturating_sub(self.active_count())
    }

    pub fn completed_count(&self) -> u64 {
        self.stats.completed.load(Ordering::Acquire)
    }

    /// Wake every job that is running right now. Interrupted jobs still count
    /// as completed; queued jobs are not affected.
    pub fn interrupt(&self) {
        self.interrupt.send_modify(|generation| *generation += 1);
    }

    /// Resolve once at least one worker is idle.
    pub async fn wait_for_idle_worker(&self) {
        loop {
            let finished = self.stats.finished.notified();
            tokio::pin!(finished);
            // register before checking so a completion in between is not lost
            finished.as_mut().enable();
            if self.idle_count() > 0 {
                return;
            }
            finished.await;
        }
    }

    /// Resolve once `target` jobs have completed in total.
    pub async fn wait_for_completed(&self, target: u64) {
        loop {
            let finished = self.stats.finished.notified();
            tokio::pin!(finished);
            finished.as_mut().enable();
            if self.completed_count() >= target {
                return;
            }
            finished.await;
        }
    }
}

async fn worker_loop(
    backlog: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>,
    stats: Arc<PoolStats>,
    mut interrupt: watch::Receiver<u64>,
) {
    loop {
        // the lock is only held while waiting for the next job
        let next = backlog.lock().await.recv().await;
        let Some(job) = next else {
            break;
        };

        stats.active.fetch_add(1, Ordering::AcqRel);
        let outcome = job.run(&mut interrupt).await;
        stats.active.fetch_sub(1, Ordering::AcqRel);
        stats.completed.fetch_add(1, Ordering::AcqRel);

        match outcome {
            RunOutcome::Finished => tracing::info!(job = %job, "job was completed"),
            RunOutcome::Interrupted => tracing::info!(job = %job, "job was completed early"),
        }
        stats.finished.notify_waiters();
    }
}
