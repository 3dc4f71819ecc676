use async_trait::async_trait;

use crate::domain::{EncodingTag, JobId, MediaReference};

#[async_trait]
pub trait TranscriptionJobService: Send + Sync {
    async fn start_job(&self, request: &JobRequest) -> Result<(), JobServiceError>;

    async fn job_status(&self, job_id: &JobId) -> Result<JobSnapshot, JobServiceError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobRequest {
    pub job_id: JobId,
    pub language_code: String,
    pub encoding: EncodingTag,
    pub media_reference: MediaReference,
    pub speaker_labels: bool,
}

/// Status as reported by the remote service. Anything the service sends that
/// is not one of the known values lands in `Other` and is treated as still
/// running. Matching ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteJobStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Other(String),
}

impl RemoteJobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "QUEUED" | "PENDING" => RemoteJobStatus::Queued,
            "IN_PROGRESS" => RemoteJobStatus::InProgress,
            "COMPLETED" => RemoteJobStatus::Completed,
            "FAILED" => RemoteJobStatus::Failed,
            _ => RemoteJobStatus::Other(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub status: RemoteJobStatus,
    pub result_reference: Option<String>,
    pub failure_reason: Option<String>,
}

impl JobSnapshot {
    pub fn running(status: RemoteJobStatus) -> Self {
        Self {
            status,
            result_reference: None,
            failure_reason: None,
        }
    }

    pub fn completed(result_reference: impl Into<String>) -> Self {
        Self {
            status: RemoteJobStatus::Completed,
            result_reference: Some(result_reference.into()),
            failure_reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: RemoteJobStatus::Failed,
            result_reference: None,
            failure_reason: Some(reason.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}
