mod http_result_fetcher;
mod mock_result_fetcher;
mod transcript_payload;

pub use http_result_fetcher::HttpResultFetcher;
pub use mock_result_fetcher::MockResultFetcher;
pub use transcript_payload::extract_transcript;
