use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Serialize;

use crate::application::services::{ErrorKind, OrchestrationError};
use crate::presentation::state::AppState;

const AUDIO_FIELD: &str = "audio";
const LANGUAGE_FIELD: &str = "language";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub ok: bool,
    pub job_id: String,
    pub language: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    fn with_message(error: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.to_string(),
            reason: None,
            message: Some(message.into()),
        }
    }
}

struct AudioUpload {
    data: Bytes,
    filename: String,
    content_type: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut audio: Option<AudioUpload> = None;
    let mut language: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return reject(StatusCode::BAD_REQUEST, "Invalid upload", e.to_string());
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(AUDIO_FIELD) => {
                let filename = field.file_name().unwrap_or("audio").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = match field.bytes().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read audio bytes");
                        return reject(StatusCode::BAD_REQUEST, "Invalid upload", e.to_string());
                    }
                };
                audio = Some(AudioUpload {
                    data,
                    filename,
                    content_type,
                });
            }
            Some(LANGUAGE_FIELD) => match field.text().await {
                Ok(value) => language = Some(value),
                Err(e) => {
                    return reject(StatusCode::BAD_REQUEST, "Invalid upload", e.to_string());
                }
            },
            _ => {}
        }
    }

    let Some(audio) = audio.filter(|a| !a.data.is_empty()) else {
        tracing::warn!("Transcribe request with no audio");
        return reject(
            StatusCode::BAD_REQUEST,
            "No audio file uploaded",
            format!("multipart field '{}' is required", AUDIO_FIELD),
        );
    };

    let language = language
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| state.default_language.clone());

    tracing::debug!(
        filename = %audio.filename,
        content_type = %audio.content_type,
        bytes = audio.data.len(),
        language = %language,
        "Processing audio upload"
    );

    match state
        .orchestrator
        .submit(audio.data, &audio.content_type, &audio.filename, &language)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(TranscribeResponse {
                ok: true,
                job_id: outcome.job_id.to_string(),
                language: outcome.language_code,
                text: outcome.text,
            }),
        )
            .into_response(),
        Err(e) => orchestration_failure(&e),
    }
}

fn reject(status: StatusCode, error: &str, message: String) -> Response {
    (status, Json(ErrorResponse::with_message(error, message))).into_response()
}

fn orchestration_failure(e: &OrchestrationError) -> Response {
    let (status, body) = match e.kind() {
        ErrorKind::RemoteFailure => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse {
                ok: false,
                error: "Transcribe failed".to_string(),
                reason: e.failure_reason().map(str::to_string),
                message: None,
            },
        ),
        ErrorKind::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            ErrorResponse {
                ok: false,
                error: "Timeout waiting for transcription".to_string(),
                reason: None,
                message: None,
            },
        ),
        ErrorKind::Validation => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::with_message("No audio file uploaded", e.to_string()),
        ),
        ErrorKind::ServerError => {
            tracing::error!(error = %e, "Transcription request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::with_message("Server error", e.to_string()),
            )
        }
    };

    (status, Json(body)).into_response()
}
