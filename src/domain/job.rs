use super::{EncodingTag, JobId, JobStatus, MediaReference};
use chrono::{DateTime, Utc};

/// One remote transcription job as tracked by a single orchestration run.
///
/// Status only moves forward: once the job is `COMPLETED`, `FAILED` or
/// `TIMED_OUT` every further transition is rejected.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub media_reference: MediaReference,
    pub language_code: String,
    pub encoding: EncodingTag,
    status: JobStatus,
    result_reference: Option<String>,
    failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JobTransitionError {
    #[error("job {job_id} is already {from}, cannot move to {to}")]
    AlreadyTerminal {
        job_id: String,
        from: JobStatus,
        to: JobStatus,
    },
    #[error("{0} is terminal and needs its own transition")]
    TerminalStatus(JobStatus),
}

impl Job {
    pub fn new(
        id: JobId,
        media_reference: MediaReference,
        language_code: String,
        encoding: EncodingTag,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            media_reference,
            language_code,
            encoding,
            status: JobStatus::Pending,
            result_reference: None,
            failure_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn result_reference(&self) -> Option<&str> {
        self.result_reference.as_deref()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Records a non-terminal status reported by the remote service.
    pub fn record_progress(&mut self, status: JobStatus) -> Result<(), JobTransitionError> {
        if status.is_terminal() {
            return Err(JobTransitionError::TerminalStatus(status));
        }
        self.transition(status)
    }

    pub fn complete(
        &mut self,
        result_reference: Option<String>,
    ) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Completed)?;
        self.result_reference = result_reference;
        Ok(())
    }

    pub fn fail(&mut self, reason: String) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Failed)?;
        self.failure_reason = Some(reason);
        Ok(())
    }

    pub fn time_out(&mut self) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::TimedOut)
    }

    fn transition(&mut self, to: JobStatus) -> Result<(), JobTransitionError> {
        if self.status.is_terminal() {
            return Err(JobTransitionError::AlreadyTerminal {
                job_id: self.id.to_string(),
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}
