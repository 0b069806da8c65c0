//! App - the concurrency core
//!
//! # Components
//! - **Publisher**: job queue, listener registry, application serving
//! - **Manager**: request loop and worker pool owner
//! - **WorkerPool**: bounded workers over an unbounded FIFO backlog
//! - **BoardBuilder / JobBoard**: wiring and reporting
//! - **console**: the interactive command loop

pub mod builder;
pub mod console;
pub mod job_factory;
pub mod manager;
pub mod publisher;
pub mod status;
pub mod worker_pool;

pub use self::builder::{BoardBuilder, JobBoard};
pub use self::console::{Command, ReportFormat, run_console};
pub use self::job_factory::JobFactory;
pub use self::manager::Manager;
pub use self::publisher::Publisher;
pub use self::status::ManagerReport;
pub use self::worker_pool::WorkerPool;
