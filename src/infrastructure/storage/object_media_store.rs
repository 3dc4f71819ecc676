use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{Attribute, ObjectStore, PutOptions, PutPayload};

use crate::application::ports::{MediaStore, MediaStoreError};
use crate::domain::{MediaReference, StorageKey};

/// `MediaStore` over any `object_store` backend. References are the backend's
/// base URI joined with the key by a single `/`.
pub struct ObjectMediaStore {
    inner: Arc<dyn ObjectStore>,
    reference_base: String,
    store_content_type: bool,
}

impl ObjectMediaStore {
    pub fn new(inner: Arc<dyn ObjectStore>, reference_base: impl Into<String>) -> Self {
        Self {
            inner,
            reference_base: reference_base.into(),
            store_content_type: true,
        }
    }

    pub fn local(base_path: PathBuf) -> Result<Self, MediaStoreError> {
        std::fs::create_dir_all(&base_path)?;
        let base_path = base_path.canonicalize()?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| MediaStoreError::Configuration(e.to_string()))?;

        // The local backend rejects object attributes.
        let mut store = Self::new(Arc::new(fs), format!("file://{}", base_path.display()));
        store.store_content_type = false;
        Ok(store)
    }

    pub fn azure(
        account: &str,
        access_key: &str,
        container: &str,
    ) -> Result<Self, MediaStoreError> {
        let store = MicrosoftAzureBuilder::new()
            .with_account(account)
            .with_access_key(access_key)
            .with_container_name(container)
            .build()
            .map_err(|e| MediaStoreError::Configuration(e.to_string()))?;

        Ok(Self::new(
            Arc::new(store),
            format!("https://{}.blob.core.windows.net/{}", account, container),
        ))
    }

    /// Credentials come from the usual `AWS_*` environment variables.
    pub fn s3(bucket: &str, region: &str) -> Result<Self, MediaStoreError> {
        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_region(region)
            .build()
            .map_err(|e| MediaStoreError::Configuration(e.to_string()))?;

        Ok(Self::new(Arc::new(store), format!("s3://{}", bucket)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()), "memory://")
    }

    pub fn reference_for(&self, key: &StorageKey) -> MediaReference {
        if self.reference_base.ends_with('/') {
            MediaReference::new(format!("{}{}", self.reference_base, key.as_str()))
        } else {
            MediaReference::new(format!("{}/{}", self.reference_base, key.as_str()))
        }
    }
}

#[async_trait::async_trait]
impl MediaStore for ObjectMediaStore {
    async fn put(
        &self,
        key: &StorageKey,
        data: Bytes,
        content_type: &str,
    ) -> Result<MediaReference, MediaStoreError> {
        let store_path = StorePath::from(key.as_str());
        let mut opts = PutOptions::default();
        if self.store_content_type {
            opts.attributes
                .insert(Attribute::ContentType, content_type.to_string().into());
        }

        let size = data.len();
        self.inner
            .put_opts(&store_path, PutPayload::from(data), opts)
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        tracing::debug!(key = %key, bytes = size, "Stored media object");
        Ok(self.reference_for(key))
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), MediaStoreError> {
        let store_path = StorePath::from(key.as_str());
        match self.inner.delete(&store_path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(MediaStoreError::DeleteFailed(e.to_string())),
        }
    }
}
