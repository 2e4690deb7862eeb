use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::health_log_service::HealthLogService;
use crate::domain::models::health_log::IndexedEntry;
use crate::domain::models::pet::Pet;
use crate::domain::photo::{PetPhoto, PhotoReader};
use crate::storage::repositories::pet_repository::RosterLock;
use crate::storage::{HealthLogRepository, PetRepository};
use shared::{CreatePetRequest, HealthLogEntryRequest, UpdatePetRequest};

const MISSING_NAME_OR_SPECIES: &str = "Please enter at least a pet name and species.";
const PHOTO_NOTICE: &str = "Could not read photo file - pet saved without photo.";
const PHOTO_KEPT_NOTICE: &str = "Could not read photo file - previous photo kept.";

/// Result of a create or update, with a notice if the supplied photo was unusable
#[derive(Debug, Clone, PartialEq)]
pub struct PetChange {
    pub pet: Pet,
    pub photo_notice: Option<String>,
}

/// Service for managing the pet roster and the health logs that belong to it.
///
/// Every health log change runs while the roster is locked and the pet is
/// known to exist. Removing a pet takes the same lock before dropping its
/// log, so a log can never outlive its pet.
#[derive(Clone)]
pub struct PetService {
    pets: Arc<PetRepository>,
    health_logs: HealthLogService,
}

impl PetService {
    pub fn new(pets: Arc<PetRepository>, health_logs: Arc<HealthLogRepository>) -> Self {
        Self {
            pets,
            health_logs: HealthLogService::new(health_logs),
        }
    }

    /// List all pets
    pub async fn list(&self) -> Vec<Pet> {
        self.pets.list().await
    }

    /// Get a pet by ID
    pub async fn get(&self, pet_id: &str) -> DomainResult<Pet> {
        self.pets
            .get(pet_id)
            .await
            .ok_or_else(|| DomainError::PetNotFound(pet_id.to_string()))
    }

    /// Add a new pet
    pub async fn add(&self, request: CreatePetRequest) -> DomainResult<PetChange> {
        info!("Adding pet: name={}, species={}", request.name, request.species);

        self.validate_required(&request.name)?;
        self.validate_required(&request.species)?;

        let (photo, photo_notice) = match request.photo_data_url {
            Some(data_url) => match PhotoReader::read(data_url).await {
                Ok(payload) => (PetPhoto::Embedded(payload.data_url), None),
                Err(e) => {
                    warn!("Photo upload for new pet {} unusable: {}", request.name.trim(), e);
                    (PetPhoto::Placeholder, Some(PHOTO_NOTICE.to_string()))
                }
            },
            None => (PetPhoto::Placeholder, None),
        };

        let pet = Pet {
            id: String::new(),
            name: request.name.trim().to_string(),
            species: request.species.trim().to_string(),
            dob: trimmed_optional(request.dob),
            diet: trimmed_or_empty(request.diet),
            notes: trimmed_or_empty(request.notes),
            photo,
        };

        let pet = self.pets.create(pet, Utc::now().timestamp_millis() as u64).await;
        info!("Added pet: {} with ID: {}", pet.name, pet.id);

        Ok(PetChange { pet, photo_notice })
    }

    /// Merge the supplied fields onto an existing pet
    pub async fn update(&self, pet_id: &str, request: UpdatePetRequest) -> DomainResult<PetChange> {
        info!("Updating pet: {}", pet_id);

        let mut pet = self.get(pet_id).await?;

        if let Some(ref name) = request.name {
            self.validate_required(name)?;
        }
        if let Some(ref species) = request.species {
            self.validate_required(species)?;
        }

        if let Some(name) = request.name {
            pet.name = name.trim().to_string();
        }
        if let Some(species) = request.species {
            pet.species = species.trim().to_string();
        }
        if let Some(dob) = request.dob {
            pet.dob = trimmed_optional(Some(dob));
        }
        if let Some(diet) = request.diet {
            pet.diet = diet.trim().to_string();
        }
        if let Some(notes) = request.notes {
            pet.notes = notes.trim().to_string();
        }

        let mut photo_notice = None;
        if let Some(data_url) = request.photo_data_url {
            match PhotoReader::read(data_url).await {
                Ok(payload) => pet.photo = PetPhoto::Embedded(payload.data_url),
                Err(e) => {
                    warn!("Photo upload for pet {} unusable: {}", pet_id, e);
                    photo_notice = Some(PHOTO_KEPT_NOTICE.to_string());
                }
            }
        }

        if !self.pets.update(pet.clone()).await {
            // Removed while the photo was being read
            return Err(DomainError::PetNotFound(pet_id.to_string()));
        }

        info!("Updated pet: {} with ID: {}", pet.name, pet.id);
        Ok(PetChange { pet, photo_notice })
    }

    /// Delete a pet together with its health log
    pub async fn remove(&self, pet_id: &str) -> DomainResult<()> {
        info!("Removing pet: {}", pet_id);

        let mut roster = self.pets.lock().await;
        let pet = roster
            .remove(pet_id)
            .await
            .ok_or_else(|| DomainError::PetNotFound(pet_id.to_string()))?;
        let removed_entries = self.health_logs.remove_all_for(pet_id).await;
        drop(roster);

        info!(
            "Removed pet: {} with ID: {} and {} health log entries",
            pet.name, pet.id, removed_entries
        );
        Ok(())
    }

    /// A pet together with its health log, newest entry first
    pub async fn health_log(&self, pet_id: &str) -> DomainResult<(Pet, Vec<IndexedEntry>)> {
        let roster = self.pets.lock().await;
        let pet = Self::require(&roster, pet_id)?.clone();
        let entries = self.health_logs.list_for_display(pet_id).await;
        Ok((pet, entries))
    }

    /// Append a health log entry, returning the updated log newest first
    pub async fn append_log_entry(
        &self,
        pet_id: &str,
        request: HealthLogEntryRequest,
    ) -> DomainResult<Vec<IndexedEntry>> {
        let roster = self.pets.lock().await;
        Self::require(&roster, pet_id)?;
        self.health_logs.append(pet_id, request).await?;
        Ok(self.health_logs.list_for_display(pet_id).await)
    }

    /// Replace the health log entry at a storage index
    pub async fn update_log_entry(
        &self,
        pet_id: &str,
        index: usize,
        request: HealthLogEntryRequest,
    ) -> DomainResult<Vec<IndexedEntry>> {
        let roster = self.pets.lock().await;
        Self::require(&roster, pet_id)?;
        self.health_logs.update_at(pet_id, index, request).await?;
        Ok(self.health_logs.list_for_display(pet_id).await)
    }

    /// Delete the health log entry at a storage index
    pub async fn remove_log_entry(&self, pet_id: &str, index: usize) -> DomainResult<Vec<IndexedEntry>> {
        let roster = self.pets.lock().await;
        Self::require(&roster, pet_id)?;
        self.health_logs.remove_at(pet_id, index).await?;
        Ok(self.health_logs.list_for_display(pet_id).await)
    }

    fn require<'a>(roster: &'a RosterLock<'_>, pet_id: &str) -> DomainResult<&'a Pet> {
        roster
            .get(pet_id)
            .ok_or_else(|| DomainError::PetNotFound(pet_id.to_string()))
    }

    fn validate_required(&self, value: &str) -> DomainResult<()> {
        if value.trim().is_empty() {
            return Err(DomainError::validation(MISSING_NAME_OR_SPECIES));
        }
        Ok(())
    }
}

fn trimmed_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trimmed_or_empty(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
