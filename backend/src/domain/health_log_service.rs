use std::sync::Arc;
use tracing::info;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::health_log::{newest_first, IndexedEntry};
use crate::storage::HealthLogRepository;
use shared::{HealthLogEntry, HealthLogEntryRequest};

const MISSING_DATE_OR_NOTE: &str = "Please add a date and a note.";

/// Service for reading and editing per-pet health logs.
///
/// Entries are addressed by their append-order index. Display order is
/// newest first, but every displayed row keeps its storage index so edits
/// and deletes land on the right entry.
#[derive(Clone)]
pub struct HealthLogService {
    repository: Arc<HealthLogRepository>,
}

impl HealthLogService {
    pub fn new(repository: Arc<HealthLogRepository>) -> Self {
        Self { repository }
    }

    /// Entries for a pet in append order
    pub async fn list_for(&self, pet_id: &str) -> Vec<HealthLogEntry> {
        self.repository.entries_for(pet_id).await
    }

    /// Entries for a pet, newest first
    pub async fn list_for_display(&self, pet_id: &str) -> Vec<IndexedEntry> {
        newest_first(&self.repository.entries_for(pet_id).await)
    }

    /// Append an entry, returning its storage index
    pub async fn append(&self, pet_id: &str, request: HealthLogEntryRequest) -> DomainResult<usize> {
        let entry = Self::validate(request)?;
        let index = self.repository.append(pet_id, entry).await;
        info!("Appended health log entry {} for pet {}", index, pet_id);
        Ok(index)
    }

    /// Replace the entry at `index`
    pub async fn update_at(
        &self,
        pet_id: &str,
        index: usize,
        request: HealthLogEntryRequest,
    ) -> DomainResult<HealthLogEntry> {
        let entry = Self::validate(request)?;

        if !self.repository.update_at(pet_id, index, entry.clone()).await {
            return Err(DomainError::EntryNotFound {
                pet_id: pet_id.to_string(),
                index,
            });
        }

        info!("Updated health log entry {} for pet {}", index, pet_id);
        Ok(entry)
    }

    /// Delete the entry at `index`
    pub async fn remove_at(&self, pet_id: &str, index: usize) -> DomainResult<HealthLogEntry> {
        let removed = self
            .repository
            .remove_at(pet_id, index)
            .await
            .ok_or_else(|| DomainError::EntryNotFound {
                pet_id: pet_id.to_string(),
                index,
            })?;

        info!("Removed health log entry {} for pet {}", index, pet_id);
        Ok(removed)
    }

    /// Drop every entry for a pet, returning how many there were
    pub async fn remove_all_for(&self, pet_id: &str) -> usize {
        self.repository.remove_all_for(pet_id).await
    }

    fn validate(request: HealthLogEntryRequest) -> DomainResult<HealthLogEntry> {
        let date = request.date.trim();
        let text = request.text.trim();

        if date.is_empty() || text.is_empty() {
            return Err(DomainError::validation(MISSING_DATE_OR_NOTE));
        }

        Ok(HealthLogEntry {
            date: date.to_string(),
            text: text.to_string(),
        })
    }
}
