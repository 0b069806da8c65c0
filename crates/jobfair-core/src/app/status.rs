//! Status - per-manager snapshot used by the quit report.

use std::fmt;

use serde::Serialize;

use crate::domain::ManagerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerReport {
    pub manager_id: ManagerId,
    pub capacity: usize,
    pub active: usize,
    pub completed: u64,
}

impl fmt::Display for ManagerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} completed {} jobs.", self.manager_id, self.completed)
    }
}
