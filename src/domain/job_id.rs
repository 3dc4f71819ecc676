use std::fmt;

use chrono::Utc;
use uuid::Uuid;

/// Identifies one submission. Doubles as the namespace of its staged blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// `<prefix>-<unix millis>-<8 hex chars>`; the random suffix keeps ids
    /// distinct when two submissions land in the same millisecond.
    pub fn generate(prefix: &str) -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}-{}", prefix, millis, &suffix[..8]))
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
