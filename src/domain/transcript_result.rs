#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranscriptResult(String);

impl TranscriptResult {
    pub fn new(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
