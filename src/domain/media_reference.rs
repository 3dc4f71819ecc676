use std::fmt;

/// URI under which the transcription service can read a staged blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference(String);

impl MediaReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
