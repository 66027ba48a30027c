//! Key-value persistence capability.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

/// Errors surfaced by a key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Minimal key-value persistence surface provided by the platform shell.
///
/// Implementations must treat `set` as a whole-value overwrite; callers
/// that need multi-field atomicity serialize one document per key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory [`KeyValueStore`] used by tests and development builds.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
