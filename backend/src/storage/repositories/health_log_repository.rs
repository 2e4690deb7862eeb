use shared::HealthLogEntry;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::storage::codec::{HealthLogMap, StorageCodec};

/// Health log entries for every pet, loaded once and written through on every change
pub struct HealthLogRepository {
    codec: StorageCodec,
    logs: Mutex<HealthLogMap>,
}

impl HealthLogRepository {
    pub async fn load(codec: StorageCodec) -> Self {
        let logs = codec.load_health_logs().await;
        info!("Loaded health logs for {} pets", logs.len());

        Self {
            codec,
            logs: Mutex::new(logs),
        }
    }

    /// Entries for a pet in append order, empty if it has none
    pub async fn entries_for(&self, pet_id: &str) -> Vec<HealthLogEntry> {
        self.logs.lock().await.get(pet_id).cloned().unwrap_or_default()
    }

    /// Append an entry, creating the pet's list if needed.
    /// Returns the new entry's index.
    pub async fn append(&self, pet_id: &str, entry: HealthLogEntry) -> usize {
        let mut logs = self.logs.lock().await;

        let entries = logs.entry(pet_id.to_string()).or_default();
        entries.push(entry);
        let index = entries.len() - 1;
        self.codec.save_health_logs(&logs).await;

        debug!("Appended health log entry {} for pet {}", index, pet_id);
        index
    }

    /// Replace the entry at `index`. Returns false if there is no such entry.
    pub async fn update_at(&self, pet_id: &str, index: usize, entry: HealthLogEntry) -> bool {
        let mut logs = self.logs.lock().await;

        let Some(slot) = logs.get_mut(pet_id).and_then(|entries| entries.get_mut(index)) else {
            return false;
        };
        *slot = entry;
        self.codec.save_health_logs(&logs).await;
        true
    }

    /// Remove the entry at `index`, returning it if it existed
    pub async fn remove_at(&self, pet_id: &str, index: usize) -> Option<HealthLogEntry> {
        let mut logs = self.logs.lock().await;

        let entries = logs.get_mut(pet_id).filter(|entries| index < entries.len())?;
        let removed = entries.remove(index);
        self.codec.save_health_logs(&logs).await;
        Some(removed)
    }

    /// Drop a pet's whole log. Returns how many entries were removed.
    pub async fn remove_all_for(&self, pet_id: &str) -> usize {
        let mut logs = self.logs.lock().await;

        let Some(removed) = logs.remove(pet_id) else {
            return 0;
        };
        self.codec.save_health_logs(&logs).await;
        removed.len()
    }
}
