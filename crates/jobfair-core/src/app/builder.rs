//! BoardBuilder - wiring a publisher and its managers.
//!
//! # Fail-fast
//! - `build()` validates the configuration before spawning anything
//! - every manager is registered as a listener before the board is returned

use std::sync::Arc;
use std::time::Duration;

use super::job_factory::JobFactory;
use super::manager::Manager;
use super::publisher::Publisher;
use super::status::ManagerReport;
use crate::config::{BoardConfig, DurationRange};
use crate::domain::Result;
use crate::domain::ids::{JobTag, ManagerTag};
use crate::ports::{IdGenerator, JobListener, SequentialIds};

/// Builds a [`JobBoard`].
///
/// # Example
/// ```ignore
/// let board = BoardBuilder::new()
///     .managers(2)
///     .workers_per_manager(4)
///     .build()?;
/// board.create_jobs(10)?;
/// ```
pub struct BoardBuilder {
    config: BoardConfig,
    job_ids: Option<Arc<dyn IdGenerator<JobTag>>>,
    manager_ids: Option<Arc<dyn IdGenerator<ManagerTag>>>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            config,
            job_ids: None,
            manager_ids: None,
        }
    }

    pub fn managers(mut self, managers: usize) -> Self {
        self.config.managers = managers;
        self
    }

    pub fn workers_per_manager(mut self, workers: usize) -> Self {
        self.config.workers_per_manager = workers;
        self
    }

    pub fn durations(mut self, durations: DurationRange) -> Self {
        self.config.durations = durations;
        self
    }

    pub fn time_unit(mut self, time_unit: Duration) -> Self {
        self.config.time_unit = time_unit;
        self
    }

    pub fn job_ids(mut self, ids: Arc<dyn IdGenerator<JobTag>>) -> Self {
        self.job_ids = Some(ids);
        self
    }

    pub fn manager_ids(mut self, ids: Arc<dyn IdGenerator<ManagerTag>>) -> Self {
        self.manager_ids = Some(ids);
        self
    }

    /// Validate, then start the managers' workers.
    ///
    /// # Panics
    /// Outside a tokio runtime.
    pub fn build(self) -> Result<JobBoard> {
        self.config.validate()?;

        let job_ids = self
            .job_ids
            .unwrap_or_else(|| Arc::new(SequentialIds::new()));
        let manager_ids = self
            .manager_ids
            .unwrap_or_else(|| Arc::new(SequentialIds::new()));

        let jobs = JobFactory::new(job_ids, self.config.durations, self.config.time_unit)?;
        let publisher = Publisher::new(jobs);

        let managers: Vec<Arc<Manager>> = (0..self.config.managers)
            .map(|_| Manager::new(manager_ids.next_id(), self.config.workers_per_manager))
            .collect();
        for manager in &managers {
            publisher.add_job_listener(manager.clone());
        }

        tracing::info!(
            managers = self.config.managers,
            workers_per_manager = self.config.workers_per_manager,
            "board ready"
        );
        Ok(JobBoard {
            publisher,
            managers,
        })
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A publisher plus the managers competing for its jobs.
pub struct JobBoard {
    publisher: Arc<Publisher>,
    managers: Vec<Arc<Manager>>,
}

impl JobBoard {
    pub fn publisher(&self) -> &Arc<Publisher> {
        &self.publisher
    }

    pub fn managers(&self) -> &[Arc<Manager>] {
        &self.managers
    }

    pub fn create_jobs(&self, count: i64) -> Result<usize> {
        self.publisher.create_jobs(count)
    }

    /// One report per manager that is still registered with the publisher.
    pub fn report(&self) -> Vec<ManagerReport> {
        self.managers
            .iter()
            .filter(|manager| {
                let listener: Arc<dyn JobListener> = (*manager).clone();
                self.publisher.is_registered(&listener)
            })
            .map(|manager| manager.report())
            .collect()
    }

    pub fn completed_total(&self) -> u64 {
        self.managers.iter().map(|m| m.completed_count()).sum()
    }
}
