//! jobfair-core
//!
//! A publisher accumulates jobs; managers, each with a fixed pool of
//! workers, compete to claim them.
//!
//! # Modules
//! - **domain**: Job, JobApplication, ids, errors
//! - **ports**: JobListener, JobSource, JobApplicant, IdGenerator
//! - **app**: Publisher, Manager, WorkerPool, board wiring, console loop
//! - **config**: board and job-duration settings

pub mod app;
pub mod config;
pub mod domain;
pub mod ports;

pub use app::{BoardBuilder, JobBoard, Manager, Publisher};
pub use config::{BoardConfig, DurationRange};
pub use domain::{Job, JobApplication, JobFairError};
