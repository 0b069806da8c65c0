//! JobFactory - numbering and sizing new jobs.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::config::DurationRange;
use crate::domain::ids::JobTag;
use crate::domain::{Job, Result};
use crate::ports::IdGenerator;

/// Builds jobs with the next sequence ID and a random duration drawn
/// uniformly from `durations`, scaled by `time_unit`.
pub struct JobFactory {
    ids: Arc<dyn IdGenerator<JobTag>>,
    durations: DurationRange,
    time_unit: Duration,
}

impl JobFactory {
    pub fn new(
        ids: Arc<dyn IdGenerator<JobTag>>,
        durations: DurationRange,
        time_unit: Duration,
    ) -> Result<Self> {
        durations.validate()?;
        Ok(Self {
            ids,
            durations,
            time_unit,
        })
    }

    pub fn create(&self) -> Job {
        let units = rand::thread_rng().gen_range(self.durations.min_units..=self.durations.max_units);
        Job::new(self.ids.next_id(), self.time_unit * units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobId;
    use crate::ports::SequentialIds;

    #[test]
    fn durations_stay_inside_the_range() {
        let factory = JobFactory::new(
            Arc::new(SequentialIds::new()),
            DurationRange::new(1, 5),
            Duration::from_millis(10),
        )
        .unwrap();

        for _ in 0..200 {
            let job = factory.create();
            assert!(job.duration() >= Duration::from_millis(10));
            assert!(job.duration() <= Duration::from_millis(50));
        }
    }

    #[test]
    fn ids_follow_the_injected_sequence() {
        let factory = JobFactory::new(
            Arc::new(SequentialIds::starting_at(40)),
            DurationRange::fixed(2),
            Duration::from_secs(1),
        )
        .unwrap();

        let first = factory.create();
        let second = factory.create();
        assert_eq!(first.id(), JobId::new(40));
        assert_eq!(second.id(), JobId::new(41));
        assert_eq!(first.duration(), Duration::from_secs(2));
    }

    #[test]
    fn invalid_range_is_refused() {
        let factory = JobFactory::new(
            Arc::new(SequentialIds::new()),
            DurationRange::new(3, 1),
            Duration::from_secs(1),
        );
        assert!(factory.is_err());
    }
}
