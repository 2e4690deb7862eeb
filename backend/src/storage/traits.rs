//! # Storage Traits
//!
//! The persistent store behind the site is a flat, string-keyed map of
//! JSON blobs (one blob per slot). This trait lets the codec and the
//! repositories work against SQLite in production and an in-memory map in
//! tests without knowing which one they have.

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Errors a key-value store can report on top of backend-specific failures
#[derive(Debug, Error, PartialEq)]
pub enum StorageError {
    /// The write would push the store past its size limit
    #[error("storage quota exceeded: writing {requested} bytes with a quota of {quota} bytes")]
    QuotaExceeded { requested: usize, quota: usize },
}

/// Trait defining the interface for string-keyed value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Retrieve a value by its key
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, overwriting any existing value for the same key
    async fn put_value(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value by its key.
    /// Returns true if the key existed.
    async fn delete_value(&self, key: &str) -> Result<bool>;

    /// List all keys in ascending order
    async fn list_keys(&self) -> Result<Vec<String>>;
}
