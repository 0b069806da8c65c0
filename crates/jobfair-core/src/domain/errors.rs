//! Errors
//!
//! Only boundaries that can refuse work return errors. Failures inside
//! spawned tasks (notification, request loop, workers) are logged where
//! they happen and never reach the publisher or manager.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobFairError {
    #[error("job count must be positive, got {0}")]
    InvalidJobCount(i64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no interactive console is attached to stdin")]
    ConsoleUnavailable,

    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, JobFairError>;
