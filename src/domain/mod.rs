mod encoding_tag;
mod job;
mod job_id;
mod job_status;
mod media_reference;
mod storage_key;
mod transcript_result;

pub use encoding_tag::EncodingTag;
pub use job::{Job, JobTransitionError};
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use media_reference::MediaReference;
pub use storage_key::StorageKey;
pub use transcript_result::TranscriptResult;
