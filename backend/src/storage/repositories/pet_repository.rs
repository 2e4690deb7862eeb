use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::domain::models::pet::Pet;
use crate::storage::codec::StorageCodec;
use super::unique_id;

/// Pet collection, loaded once and written through on every change
pub struct PetRepository {
    codec: StorageCodec,
    pets: Mutex<Vec<Pet>>,
}

/// Exclusive hold on the roster.
///
/// Other roster operations wait until it is dropped, so work done while it
/// is held (such as a health log change) cannot interleave with a removal.
pub struct RosterLock<'a> {
    codec: &'a StorageCodec,
    pets: MutexGuard<'a, Vec<Pet>>,
}

impl RosterLock<'_> {
    pub fn get(&self, pet_id: &str) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == pet_id)
    }

    /// Remove a pet by ID, returning it if it existed
    pub async fn remove(&mut self, pet_id: &str) -> Option<Pet> {
        let position = self.pets.iter().position(|p| p.id == pet_id)?;
        let removed = self.pets.remove(position);
        persist(self.codec, &self.pets).await;
        Some(removed)
    }
}

async fn persist(codec: &StorageCodec, pets: &[Pet]) {
    let stored: Vec<shared::Pet> = pets.iter().cloned().map(shared::Pet::from).collect();
    codec.save_pets(&stored).await;
}

impl PetRepository {
    /// Load the pet collection (seeding and migrating as needed)
    pub async fn load(codec: StorageCodec) -> Self {
        let pets: Vec<Pet> = codec.load_pets().await.into_iter().map(Pet::from).collect();
        info!("Loaded {} pets", pets.len());

        Self {
            codec,
            pets: Mutex::new(pets),
        }
    }

    /// Hold the roster until the returned lock is dropped
    pub async fn lock(&self) -> RosterLock<'_> {
        RosterLock {
            codec: &self.codec,
            pets: self.pets.lock().await,
        }
    }

    /// All pets in roster order
    pub async fn list(&self) -> Vec<Pet> {
        self.pets.lock().await.clone()
    }

    pub async fn get(&self, pet_id: &str) -> Option<Pet> {
        self.lock().await.get(pet_id).cloned()
    }

    /// Append a new pet under a fresh ID derived from `epoch_millis`.
    /// The `id` already on `pet` is ignored.
    pub async fn create(&self, mut pet: Pet, epoch_millis: u64) -> Pet {
        let mut pets = self.pets.lock().await;

        pet.id = unique_id(shared::Pet::generate_id(epoch_millis), |id| {
            pets.iter().any(|p| p.id == id)
        });
        pets.push(pet.clone());
        persist(&self.codec, &pets).await;

        debug!("Stored pet {} ({})", pet.name, pet.id);
        pet
    }

    /// Replace the pet with the same ID. Returns false if there is none.
    pub async fn update(&self, pet: Pet) -> bool {
        let mut pets = self.pets.lock().await;

        let Some(slot) = pets.iter_mut().find(|p| p.id == pet.id) else {
            return false;
        };
        *slot = pet;
        persist(&self.codec, &pets).await;
        true
    }

    /// Remove a pet by ID, returning it if it existed
    pub async fn remove(&self, pet_id: &str) -> Option<Pet> {
        self.lock().await.remove(pet_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::photo::PetPhoto;
    use crate::storage::codec::PETS_KEY;
    use crate::storage::memory::MemoryStore;
    use crate::storage::KeyValueStore;
    use std::sync::Arc;

    async fn setup_test_repo() -> (PetRepository, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let repo = PetRepository::load(StorageCodec::new(store.clone())).await;
        (repo, store)
    }

    fn new_pet(name: &str) -> Pet {
        Pet {
            id: String::new(),
            name: name.to_string(),
            species: "Rabbit".to_string(),
            dob: None,
            diet: String::new(),
            notes: String::new(),
            photo: PetPhoto::Placeholder,
        }
    }

    async fn stored_ids(store: &MemoryStore) -> Vec<String> {
        let raw = store.get_value(PETS_KEY).await.unwrap().unwrap();
        let pets: Vec<shared::Pet> = serde_json::from_str(&raw).unwrap();
        pets.into_iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids_and_persists() {
        let (repo, store) = setup_test_repo().await;

        let first = repo.create(new_pet("Bun"), 1_700_000_000_000).await;
        let second = repo.create(new_pet("Hop"), 1_700_000_000_000).await;

        assert_eq!(first.id, "pet-1700000000000");
        assert_eq!(second.id, "pet-1700000000000-2");
        assert_eq!(repo.list().await.len(), 5);
        assert!(stored_ids(&store).await.contains(&second.id));
    }

    #[tokio::test]
    async fn test_update_unknown_pet_is_rejected() {
        let (repo, _store) = setup_test_repo().await;

        let mut ghost = new_pet("Ghost");
        ghost.id = "pet-missing".to_string();

        assert!(!repo.update(ghost).await);
    }

    #[tokio::test]
    async fn test_lock_blocks_other_roster_changes() {
        let (repo, _store) = setup_test_repo().await;
        let repo = Arc::new(repo);
        let pet_id = repo.list().await[0].id.clone();

        let roster = repo.lock().await;
        let remover = {
            let repo = repo.clone();
            let pet_id = pet_id.clone();
            tokio::spawn(async move { repo.remove(&pet_id).await })
        };
        tokio::task::yield_now().await;

        assert!(roster.get(&pet_id).is_some());
        assert!(!remover.is_finished());

        drop(roster);
        assert!(remover.await.unwrap().is_some());
        assert!(repo.get(&pet_id).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_persists() {
        let (repo, store) = setup_test_repo().await;
        let pet = repo.create(new_pet("Bun"), 42).await;

        assert_eq!(repo.remove(&pet.id).await.map(|p| p.name), Some("Bun".to_string()));
        assert!(repo.remove(&pet.id).await.is_none());
        assert!(!stored_ids(&store).await.contains(&pet.id));
    }
}
