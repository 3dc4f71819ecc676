use std::time::Duration;

use crate::application::ports::{JobRequest, JobServiceError, JobSnapshot, TranscriptionJobService};
use crate::domain::JobId;

/// Completes every job on its first status query.
pub struct MockJobService {
    start_delay: Duration,
}

impl MockJobService {
    pub fn new(start_delay: Duration) -> Self {
        Self { start_delay }
    }
}

#[async_trait::async_trait]
impl TranscriptionJobService for MockJobService {
    async fn start_job(&self, _request: &JobRequest) -> Result<(), JobServiceError> {
        if !self.start_delay.is_zero() {
            tokio::time::sleep(self.start_delay).await;
        }
        Ok(())
    }

    async fn job_status(&self, job_id: &JobId) -> Result<JobSnapshot, JobServiceError> {
        Ok(JobSnapshot::completed(format!("mock://{}", job_id)))
    }
}
