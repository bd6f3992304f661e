//! Media Store
//!
//! Port to the blob storage that holds uploaded images and clips. The crate
//! only deals in storage keys and the public URLs the store hands back;
//! transport, format checks, and size limits belong to the upload widget.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{now_ms, DomainError, DomainResult};

/// Async port to the blob store
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store a blob under `key` and return its public URL. The URL is kept
    /// verbatim as an entity field value.
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> DomainResult<String>;
}

/// Storage key for a field of one entity, e.g. `products/p-17/image_url`.
/// Re-uploading the same field replaces the old blob.
pub fn object_key(entity_type: &str, entity_id: &str, field: &str) -> String {
    format!("{}/{}/{}", entity_type, entity_id, field)
}

/// Storage key that never collides: the upload time in epoch milliseconds
/// prefixes the original file name, e.g. `uploads/1724563200000-hero.jpg`.
pub fn timestamped_key(prefix: &str, file_name: &str) -> String {
    format!("{}/{}-{}", prefix, now_ms(), file_name)
}

/// In-process media store for tests and demos. Uploaded blobs are held in
/// memory and addressed as `memory://{key}`.
#[derive(Clone, Default)]
pub struct MemoryMediaStore {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> DomainResult<String> {
        if key.is_empty() {
            return Err(DomainError::Validation(
                "storage key must not be empty".to_string(),
            ));
        }
        self.blobs.lock().await.insert(key.to_string(), bytes);
        Ok(format!("memory://{}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_shape() {
        assert_eq!(
            object_key("products", "p-17", "image_url"),
            "products/p-17/image_url"
        );
    }

    #[test]
    fn test_timestamped_key_keeps_file_name() {
        let key = timestamped_key("uploads", "hero.jpg");
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with("-hero.jpg"));
    }

    #[tokio::test]
    async fn test_memory_upload_roundtrip() {
        let store = MemoryMediaStore::new();
        let url = store
            .upload("products/p-1/image_url", vec![1, 2, 3])
            .await
            .expect("upload failed");
        assert_eq!(url, "memory://products/p-1/image_url");
        assert_eq!(store.blob("products/p-1/image_url").await, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let store = MemoryMediaStore::new();
        assert!(store.upload("", vec![]).await.is_err());
    }
}
