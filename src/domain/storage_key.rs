use std::fmt;

use super::{EncodingTag, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn for_job(prefix: &str, job_id: &JobId, encoding: EncodingTag) -> Self {
        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            Self(format!("{}.{}", job_id, encoding.extension()))
        } else {
            Self(format!("{}/{}.{}", prefix, job_id, encoding.extension()))
        }
    }

    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
