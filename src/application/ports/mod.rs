mod media_store;
mod result_fetcher;
mod sleeper;
mod transcription_job_service;

pub use media_store::{MediaStore, MediaStoreError};
pub use result_fetcher::{FetchError, ResultFetcher};
pub use sleeper::Sleeper;
pub use transcription_job_service::{
    JobRequest, JobServiceError, JobSnapshot, RemoteJobStatus, TranscriptionJobService,
};
