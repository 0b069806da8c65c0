//! Domain model (ids, jobs, applications, errors).

pub mod application;
pub mod errors;
pub mod ids;
pub mod job;

pub use application::JobApplication;
pub use errors::{JobFairError, Result};
pub use ids::{Id, IdMarker, JobId, ManagerId};
pub use job::{Job, RunOutcome};
