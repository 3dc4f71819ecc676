use async_trait::async_trait;

use crate::domain::TranscriptResult;

#[async_trait]
pub trait ResultFetcher: Send + Sync {
    async fn fetch(&self, reference: &str) -> Result<TranscriptResult, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("result request failed: {0}")]
    RequestFailed(String),
    #[error("result payload unparseable: {0}")]
    InvalidPayload(String),
    #[error("completed job carried no result reference")]
    MissingReference,
}
