use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::{KeyValueStore, StorageError};

/// Volatile key-value store, optionally limited to a total size in bytes.
///
/// The quota counts key and value lengths of everything stored, the same
/// way a browser's local storage limit behaves.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once `quota` bytes are in use
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: Arc::default(),
            quota: Some(quota),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().await;

        if let Some(quota) = self.quota {
            let others: usize = values
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let requested = others + key.len() + value.len();
            if requested > quota {
                return Err(StorageError::QuotaExceeded { requested, quota }.into());
            }
        }

        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_value(&self, key: &str) -> Result<bool> {
        Ok(self.values.write().await.remove(key).is_some())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.values.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
