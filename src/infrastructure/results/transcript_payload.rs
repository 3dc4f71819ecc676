use serde_json::Value;

use crate::application::ports::FetchError;
use crate::domain::TranscriptResult;

/// Pulls `results.transcripts[0].transcript` out of a finished job payload.
/// Any missing link in that chain yields an empty transcript.
pub fn extract_transcript(payload: &[u8]) -> Result<TranscriptResult, FetchError> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| FetchError::InvalidPayload(e.to_string()))?;

    let text = value
        .get("results")
        .and_then(|r| r.get("transcripts"))
        .and_then(|t| t.get(0))
        .and_then(|t| t.get("transcript"))
        .and_then(Value::as_str);

    Ok(text.map(TranscriptResult::new).unwrap_or_default())
}
