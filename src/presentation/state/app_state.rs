use std::sync::Arc;

use crate::application::services::TranscriptionOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TranscriptionOrchestrator>,
    pub default_language: String,
    pub max_upload_bytes: usize,
}
