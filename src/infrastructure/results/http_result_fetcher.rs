use async_trait::async_trait;

use super::extract_transcript;
use crate::application::ports::{FetchError, ResultFetcher};
use crate::domain::TranscriptResult;

pub struct HttpResultFetcher {
    client: reqwest::Client,
}

impl HttpResultFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpResultFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultFetcher for HttpResultFetcher {
    async fn fetch(&self, reference: &str) -> Result<TranscriptResult, FetchError> {
        let response = self
            .client
            .get(reference)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(FetchError::RequestFailed(format!(
                "status {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::RequestFailed(format!("body: {}", e)))?;

        let transcript = extract_transcript(&body)?;
        tracing::debug!(chars = transcript.as_str().len(), "Transcript payload fetched");
        Ok(transcript)
    }
}
