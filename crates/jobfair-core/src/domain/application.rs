//! JobApplication - "applicant A would like up to K jobs".

use std::fmt;
use std::sync::{Arc, Weak};

use crate::ports::JobApplicant;

/// An immutable request for jobs.
///
/// The applicant is held weakly: an application never keeps its manager
/// alive, and an application whose manager is gone is the "missing manager"
/// case that the publisher rejects. The requested count is whatever the
/// applicant believed its idle capacity was when it built the application;
/// it is a hint, not a reservation.
///
/// Construction accepts any count so invalid applications can be built in
/// tests. Validation happens in the publisher.
#[derive(Clone)]
pub struct JobApplication {
    applicant: Weak<dyn JobApplicant>,
    requested: i64,
}

impl JobApplication {
    pub fn new(applicant: Weak<dyn JobApplicant>, requested: i64) -> Self {
        Self {
            applicant,
            requested,
        }
    }

    /// The applicant, if it is still alive.
    pub fn applicant(&self) -> Option<Arc<dyn JobApplicant>> {
        self.applicant.upgrade()
    }

    pub fn requested(&self) -> i64 {
        self.requested
    }
}

impl fmt::Debug for JobApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let applicant = self.applicant().map(|a| a.to_string());
        f.debug_struct("JobApplication")
            .field("applicant", &applicant)
            .field("requested", &self.requested)
            .finish()
    }
}
