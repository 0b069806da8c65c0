//! JobListener port - "new jobs were published".

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::JobSource;

/// Receives new-job notifications from a publisher.
///
/// Each notification runs on its own task, so an implementation may take
/// as long as it likes without delaying other listeners or the publisher.
#[async_trait]
pub trait JobListener: Send + Sync + fmt::Display {
    async fn new_jobs_available(&self, source: Arc<dyn JobSource>);
}
