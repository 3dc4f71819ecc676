use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::Instrument;

use super::resolve_encoding;
use crate::application::ports::{
    FetchError, JobRequest, JobServiceError, MediaStore, MediaStoreError, RemoteJobStatus,
    ResultFetcher, Sleeper, TranscriptionJobService,
};
use crate::domain::{Job, JobId, JobStatus, JobTransitionError, StorageKey, TranscriptResult};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 25;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Fixed, backoff-free polling budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOutcome {
    pub job_id: JobId,
    pub language_code: String,
    pub text: String,
}

/// Drives one upload through stage → submit → poll → fetch → cleanup.
pub struct TranscriptionOrchestrator {
    media_store: Arc<dyn MediaStore>,
    job_service: Arc<dyn TranscriptionJobService>,
    result_fetcher: Arc<dyn ResultFetcher>,
    sleeper: Arc<dyn Sleeper>,
    poll_policy: PollPolicy,
    job_prefix: String,
    key_prefix: String,
}

impl TranscriptionOrchestrator {
    pub fn new(
        media_store: Arc<dyn MediaStore>,
        job_service: Arc<dyn TranscriptionJobService>,
        result_fetcher: Arc<dyn ResultFetcher>,
        sleeper: Arc<dyn Sleeper>,
        poll_policy: PollPolicy,
    ) -> Self {
        Self {
            media_store,
            job_service,
            result_fetcher,
            sleeper,
            poll_policy,
            job_prefix: "transcribe".to_string(),
            key_prefix: "uploads".to_string(),
        }
    }

    pub fn with_job_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.job_prefix = prefix.into();
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }

    pub async fn submit(
        &self,
        audio: Bytes,
        content_type: &str,
        filename: &str,
        language_code: &str,
    ) -> Result<TranscriptionOutcome, OrchestrationError> {
        if audio.is_empty() {
            return Err(OrchestrationError::Validation(
                "audio payload is empty".to_string(),
            ));
        }

        let job_id = JobId::generate(&self.job_prefix);
        let encoding = resolve_encoding(content_type, filename);
        let key = StorageKey::for_job(&self.key_prefix, &job_id, encoding);

        let span = tracing::info_span!(
            "transcription_job",
            job_id = %job_id,
            encoding = %encoding,
            language = %language_code,
        );

        async move {
            let upload_type = if content_type.trim().is_empty() {
                encoding.as_mime()
            } else {
                content_type
            };

            let media_reference = self
                .media_store
                .put(&key, audio, upload_type)
                .await
                .map_err(OrchestrationError::Store)?;

            tracing::debug!(key = %key, reference = %media_reference, "Audio staged");

            let job = Job::new(
                job_id.clone(),
                media_reference,
                language_code.to_string(),
                encoding,
            );
            let result = self.run_job(job).await;

            self.discard_staged(&key).await;

            match result {
                Ok(transcript) => {
                    tracing::info!(chars = transcript.as_str().len(), "Transcription finished");
                    Ok(TranscriptionOutcome {
                        job_id,
                        language_code: language_code.to_string(),
                        text: transcript.into_string(),
                    })
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Transcription did not finish");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run_job(&self, mut job: Job) -> Result<TranscriptResult, OrchestrationError> {
        let request = JobRequest {
            job_id: job.id.clone(),
            language_code: job.language_code.clone(),
            encoding: job.encoding,
            media_reference: job.media_reference.clone(),
            speaker_labels: false,
        };

        self.job_service
            .start_job(&request)
            .await
            .map_err(OrchestrationError::Submission)?;

        let reference = self.poll_until_resolved(&mut job).await?;

        self.result_fetcher
            .fetch(&reference)
            .await
            .map_err(OrchestrationError::Fetch)
    }

    /// Returns the result reference once the job completes. At most
    /// `max_attempts` status queries are made with `interval` between them.
    async fn poll_until_resolved(&self, job: &mut Job) -> Result<String, OrchestrationError> {
        let max_attempts = self.poll_policy.max_attempts;

        for attempt in 1..=max_attempts {
            let snapshot = self
                .job_service
                .job_status(&job.id)
                .await
                .map_err(OrchestrationError::StatusQuery)?;

            match snapshot.status {
                RemoteJobStatus::Completed => {
                    job.complete(snapshot.result_reference)?;
                    tracing::debug!(attempt, status = %job.status(), "Job status transition");
                    return job
                        .result_reference()
                        .filter(|r| !r.is_empty())
                        .map(str::to_string)
                        .ok_or(OrchestrationError::Fetch(FetchError::MissingReference));
                }
                RemoteJobStatus::Failed => {
                    let reason = snapshot
                        .failure_reason
                        .unwrap_or_else(|| "unknown failure".to_string());
                    job.fail(reason.clone())?;
                    tracing::debug!(attempt, status = %job.status(), "Job status transition");
                    return Err(OrchestrationError::RemoteFailure { reason });
                }
                RemoteJobStatus::Queued => job.record_progress(JobStatus::Pending)?,
                RemoteJobStatus::InProgress => job.record_progress(JobStatus::InProgress)?,
                RemoteJobStatus::Other(raw) => {
                    tracing::debug!(
                        attempt,
                        remote_status = %raw,
                        "Unrecognised status, still waiting"
                    );
                    job.record_progress(JobStatus::InProgress)?
                }
            }

            tracing::debug!(attempt, status = %job.status(), "Job not resolved yet");

            if attempt < max_attempts {
                self.sleeper.sleep(self.poll_policy.interval).await;
            }
        }

        job.time_out()?;
        Err(OrchestrationError::Timeout {
            attempts: max_attempts,
        })
    }

    async fn discard_staged(&self, key: &StorageKey) {
        if let Err(e) = self.media_store.delete(key).await {
            tracing::warn!(error = %e, key = %key, "Failed to delete staged audio");
        }
    }
}

/// User-visible failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    RemoteFailure,
    Timeout,
    ServerError,
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("staging: {0}")]
    Store(MediaStoreError),
    #[error("job submission: {0}")]
    Submission(JobServiceError),
    #[error("status query: {0}")]
    StatusQuery(JobServiceError),
    #[error("transcription failed: {reason}")]
    RemoteFailure { reason: String },
    #[error("no terminal status after {attempts} attempts")]
    Timeout { attempts: u32 },
    #[error("result fetch: {0}")]
    Fetch(FetchError),
    #[error("job state: {0}")]
    Internal(#[from] JobTransitionError),
}

impl OrchestrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrchestrationError::Validation(_) => ErrorKind::Validation,
            OrchestrationError::RemoteFailure { .. } => ErrorKind::RemoteFailure,
            OrchestrationError::Timeout { .. } => ErrorKind::Timeout,
            OrchestrationError::Store(_)
            | OrchestrationError::Submission(_)
            | OrchestrationError::StatusQuery(_)
            | OrchestrationError::Fetch(_)
            | OrchestrationError::Internal(_) => ErrorKind::ServerError,
        }
    }

    /// Reason reported by the remote service for a failed job.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            OrchestrationError::RemoteFailure { reason } => Some(reason),
            _ => None,
        }
    }
}
