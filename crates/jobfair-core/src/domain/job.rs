//! Job - one simulated unit of work.

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;

use super::ids::JobId;

/// An immutable unit of work with a fixed simulated duration.
///
/// `Job` is deliberately not `Clone`: it moves from the publisher's queue
/// into exactly one worker pool and is dropped when it finishes.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Job {
    id: JobId,
    duration: Duration,
}

/// How a run ended. Both variants count as a completed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Finished,
    Interrupted,
}

impl Job {
    pub fn new(id: JobId, duration: Duration) -> Self {
        Self { id, duration }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Hold the calling task for the job's duration.
    ///
    /// `interrupt` carries a generation counter; any bump observed while the
    /// job is sleeping ends it early. A closed channel never interrupts.
    pub async fn run(&self, interrupt: &mut watch::Receiver<u64>) -> RunOutcome {
        // only bumps that happen after the job starts count
        interrupt.borrow_and_update();

        let work = tokio::time::sleep(self.duration);
        tokio::pin!(work);

        tokio::select! {
            _ = &mut work => RunOutcome::Finished,
            Ok(()) = interrupt.changed() => {
                tracing::warn!(job = %self.id, "job interrupted before finishing its work");
                RunOutcome::Interrupted
            }
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.duration.subsec_nanos() == 0 {
            write!(f, "{} of duration {} seconds", self.id, self.duration.as_secs())
        } else {
            write!(f, "{} of duration {} ms", self.id, self.duration.as_millis())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Instant;

    #[test]
    fn equality_needs_id_and_duration() {
        let a = Job::new(JobId::new(1), Duration::from_secs(2));
        assert_eq!(a, Job::new(JobId::new(1), Duration::from_secs(2)));
        assert_ne!(a, Job::new(JobId::new(1), Duration::from_secs(3)));
        assert_ne!(a, Job::new(JobId::new(2), Duration::from_secs(2)));
    }

    #[rstest]
    #[case::whole_seconds(Duration::from_secs(3), "Job-12 of duration 3 seconds")]
    #[case::one_second(Duration::from_secs(1), "Job-12 of duration 1 seconds")]
    #[case::milliseconds(Duration::from_millis(40), "Job-12 of duration 40 ms")]
    fn display_names_the_job(#[case] duration: Duration, #[case] expected: &str) {
        let job = Job::new(JobId::new(12), duration);
        assert_eq!(job.to_string(), expected);
    }

    #[tokio::test]
    async fn run_waits_for_the_duration() {
        let (_tx, mut rx) = watch::channel(0u64);
        let job = Job::new(JobId::new(1), Duration::from_millis(40));

        let start = Instant::now();
        let outcome = job.run(&mut rx).await;

        assert_eq!(outcome, RunOutcome::Finished);
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn interrupt_ends_the_run_early() {
        let (tx, mut rx) = watch::channel(0u64);
        let job = Job::new(JobId::new(1), Duration::from_secs(30));

        let start = Instant::now();
        let run = job.run(&mut rx);
        let bump = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            tx.send_modify(|generation| *generation += 1);
        };
        let (outcome, ()) = tokio::join!(run, bump);

        assert_eq!(outcome, RunOutcome::Interrupted);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn earlier_interrupts_are_ignored() {
        let (tx, mut rx) = watch::channel(0u64);
        tx.send_modify(|generation| *generation += 1);

        let job = Job::new(JobId::new(1), Duration::from_millis(20));
        assert_eq!(job.run(&mut rx).await, RunOutcome::Finished);
    }

    #[tokio::test]
    async fn closed_interrupt_channel_does_not_cut_the_run_short() {
        let (tx, mut rx) = watch::channel(0u64);
        drop(tx);

        let job = Job::new(JobId::new(1), Duration::from_millis(30));
        let start = Instant::now();
        assert_eq!(job.run(&mut rx).await, RunOutcome::Finished);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
