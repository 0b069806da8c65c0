//! Ports - the seams between components
//!
//! The seams between the publisher and the managers. The publisher only
//! knows listeners and applicants; a manager only knows a job source. Tests
//! plug recording fakes into any of them.

pub mod id_generator;
pub mod job_source;
pub mod listener;

pub use self::id_generator::{IdGenerator, SequentialIds};
pub use self::job_source::{JobApplicant, JobSource};
pub use self::listener::JobListener;
