//! JobSource / JobApplicant ports - the application protocol.

use std::fmt;

use crate::domain::{Job, JobApplication};

/// Something managers can poll and apply to for jobs.
pub trait JobSource: Send + Sync {
    /// Non-blocking emptiness check.
    fn has_jobs_available(&self) -> bool;

    /// Serve an application, returning how many jobs were handed to the
    /// applicant. Invalid applications are ignored and report 0.
    ///
    /// When jobs are handed out, the applicant's `assign_jobs` runs on the
    /// caller's task before this returns.
    fn submit_job_application(&self, application: JobApplication) -> usize;
}

/// Something that can receive a batch of jobs.
pub trait JobApplicant: Send + Sync + fmt::Display {
    /// Accept a non-empty batch, in queue order. Must not block.
    fn assign_jobs(&self, jobs: Vec<Job>);
}
