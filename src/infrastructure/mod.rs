pub mod observability;
pub mod results;
pub mod storage;
pub mod time;
pub mod transcription;
