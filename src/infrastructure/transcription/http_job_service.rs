use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    JobRequest, JobServiceError, JobSnapshot, RemoteJobStatus, TranscriptionJobService,
};
use crate::domain::JobId;

/// REST client for a transcription job API that speaks the AWS Transcribe
/// job shapes as plain JSON.
pub struct HttpJobService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpJobService {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// `{base}/jobs/{job_id}` with the id escaped as a single path segment.
    fn job_url(&self, job_id: &JobId) -> Result<reqwest::Url, JobServiceError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| JobServiceError::ApiRequestFailed(format!("base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                JobServiceError::ApiRequestFailed(format!("base url: {}", self.base_url))
            })?
            .pop_if_empty()
            .push("jobs")
            .push(job_id.as_str());
        Ok(url)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct StartJobBody<'a> {
    transcription_job_name: &'a str,
    language_code: &'a str,
    media_format: &'a str,
    media: MediaBody<'a>,
    settings: SettingsBody,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct MediaBody<'a> {
    media_file_uri: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsBody {
    show_speaker_labels: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetJobResponse {
    transcription_job: JobBody,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JobBody {
    transcription_job_status: String,
    #[serde(default)]
    transcript: Option<TranscriptBody>,
    #[serde(default)]
    failure_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TranscriptBody {
    #[serde(default)]
    transcript_file_uri: Option<String>,
}

async fn error_for_status(response: reqwest::Response) -> JobServiceError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    JobServiceError::ApiRequestFailed(format!("status {}: {}", status, body))
}

#[async_trait]
impl TranscriptionJobService for HttpJobService {
    async fn start_job(&self, request: &JobRequest) -> Result<(), JobServiceError> {
        let url = format!("{}/jobs", self.base_url);
        let body = StartJobBody {
            transcription_job_name: request.job_id.as_str(),
            language_code: &request.language_code,
            media_format: request.encoding.as_str(),
            media: MediaBody {
                media_file_uri: request.media_reference.as_str(),
            },
            settings: SettingsBody {
                show_speaker_labels: request.speaker_labels,
            },
        };

        tracing::debug!(url = %url, job_id = %request.job_id, "Starting transcription job");

        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| JobServiceError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        Ok(())
    }

    async fn job_status(&self, job_id: &JobId) -> Result<JobSnapshot, JobServiceError> {
        let url = self.job_url(job_id)?;

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| JobServiceError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let body: GetJobResponse = response
            .json()
            .await
            .map_err(|e| JobServiceError::InvalidResponse(format!("parse response: {}", e)))?;

        let job = body.transcription_job;
        Ok(JobSnapshot {
            status: RemoteJobStatus::parse(&job.transcription_job_status),
            result_reference: job.transcript.and_then(|t| t.transcript_file_uri),
            failure_reason: job.failure_reason,
        })
    }
}
