use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{MediaStore, MediaStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::object_media_store::ObjectMediaStore;

pub struct MediaStoreFactory;

impl MediaStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn MediaStore>, MediaStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                let store = ObjectMediaStore::local(path)?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Azure => {
                let account = required(settings.azure_account.as_deref(), "azure_account")?;
                let key = required(settings.azure_access_key.as_deref(), "azure_access_key")?;
                let container = required(settings.azure_container.as_deref(), "azure_container")?;
                let store = ObjectMediaStore::azure(account, key, container)?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::S3 => {
                let bucket = required(settings.s3_bucket.as_deref(), "s3_bucket")?;
                let region = required(settings.s3_region.as_deref(), "s3_region")?;
                let store = ObjectMediaStore::s3(bucket, region)?;
                Ok(Arc::new(store))
            }
        }
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, MediaStoreError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MediaStoreError::Configuration(format!("{} required", name)))
}
