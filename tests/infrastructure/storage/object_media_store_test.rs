use bytes::Bytes;

use transcribe_relay::application::ports::MediaStore;
use transcribe_relay::domain::StorageKey;
use transcribe_relay::infrastructure::storage::ObjectMediaStore;

fn create_test_store() -> (tempfile::TempDir, ObjectMediaStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = ObjectMediaStore::local(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_audio_bytes_when_putting_locally_then_file_is_persisted_under_key() {
    let (dir, store) = create_test_store();
    let key = StorageKey::from_raw("uploads/transcribe-1-aaaaaaaa.webm");

    store
        .put(&key, Bytes::from_static(b"webm bytes"), "audio/webm")
        .await
        .unwrap();

    let on_disk = std::fs::read(dir.path().join("uploads/transcribe-1-aaaaaaaa.webm")).unwrap();
    assert_eq!(on_disk, b"webm bytes");
}

#[tokio::test]
async fn given_local_store_when_putting_then_reference_is_file_uri_ending_with_key() {
    let (dir, store) = create_test_store();
    let key = StorageKey::from_raw("uploads/a.wav");

    let reference = store
        .put(&key, Bytes::from_static(b"data"), "audio/wav")
        .await
        .unwrap();

    let canonical = dir.path().canonicalize().unwrap();
    assert_eq!(
        reference.as_str(),
        format!("file://{}/uploads/a.wav", canonical.display())
    );
}

#[tokio::test]
async fn given_stored_blob_when_deleting_then_file_is_removed() {
    let (dir, store) = create_test_store();
    let key = StorageKey::from_raw("uploads/b.mp3");
    store
        .put(&key, Bytes::from_static(b"data"), "audio/mpeg")
        .await
        .unwrap();

    store.delete(&key).await.unwrap();

    assert!(!dir.path().join("uploads/b.mp3").exists());
}

#[tokio::test]
async fn given_missing_blob_when_deleting_then_succeeds() {
    let (_dir, store) = create_test_store();
    let key = StorageKey::from_raw("uploads/never-stored.ogg");

    assert!(store.delete(&key).await.is_ok());
}

#[tokio::test]
async fn given_in_memory_store_when_putting_then_reference_uses_memory_scheme() {
    let store = ObjectMediaStore::in_memory();
    let key = StorageKey::from_raw("uploads/c.webm");

    let reference = store
        .put(&key, Bytes::from_static(b"data"), "audio/webm")
        .await
        .unwrap();

    assert_eq!(reference.as_str(), "memory://uploads/c.webm");
    assert!(store.delete(&key).await.is_ok());
}

#[test]
fn given_base_with_or_without_trailing_slash_when_building_reference_then_joins_with_one_slash() {
    let key = StorageKey::from_raw("uploads/d.wav");
    let slashed = ObjectMediaStore::new(
        std::sync::Arc::new(object_store::memory::InMemory::new()),
        "s3://audio-bucket/",
    );
    let bare = ObjectMediaStore::new(
        std::sync::Arc::new(object_store::memory::InMemory::new()),
        "s3://audio-bucket",
    );

    assert_eq!(
        slashed.reference_for(&key).as_str(),
        "s3://audio-bucket/uploads/d.wav"
    );
    assert_eq!(
        bare.reference_for(&key).as_str(),
        "s3://audio-bucket/uploads/d.wav"
    );
}
