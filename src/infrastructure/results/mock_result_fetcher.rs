use crate::application::ports::{FetchError, ResultFetcher};
use crate::domain::TranscriptResult;

pub struct MockResultFetcher {
    text: String,
}

impl MockResultFetcher {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait::async_trait]
impl ResultFetcher for MockResultFetcher {
    async fn fetch(&self, _reference: &str) -> Result<TranscriptResult, FetchError> {
        Ok(TranscriptResult::new(&self.text))
    }
}
