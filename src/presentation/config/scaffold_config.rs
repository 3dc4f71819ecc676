/// Configuration for scaffold mode: every remote collaborator is replaced by
/// an in-process fake so the HTTP surface runs without cloud credentials.
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    pub enabled: bool,
    pub mock_response_delay_ms: u64,
    pub mock_transcript: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            enabled: std::env::var("SCAFFOLD_MODE")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            mock_response_delay_ms: std::env::var("MOCK_RESPONSE_DELAY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            mock_transcript: std::env::var("MOCK_TRANSCRIPT")
                .unwrap_or_else(|_| "Scaffold transcript".to_string()),
        }
    }
}
