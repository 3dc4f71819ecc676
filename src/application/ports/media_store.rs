use bytes::Bytes;

use crate::domain::{MediaReference, StorageKey};

#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    async fn put(
        &self,
        key: &StorageKey,
        data: Bytes,
        content_type: &str,
    ) -> Result<MediaReference, MediaStoreError>;

    async fn delete(&self, key: &StorageKey) -> Result<(), MediaStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("store configuration invalid: {0}")]
    Configuration(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
