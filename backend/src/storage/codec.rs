//! # Storage Codec
//!
//! Maps each collection to and from its JSON blob in the key-value store.
//!
//! Loading never fails: an absent slot yields the collection's default, a
//! blob that does not parse yields the default without touching storage,
//! and legacy shapes are migrated (and written back) on the way in. Saving
//! never fails either: a rejected write is logged and the caller carries on
//! with its in-memory state.

use chrono::Utc;
use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Deserialize, Serialize,
};
use serde_json::Value;
use shared::{FeedbackMessage, HealthLogEntry, Pet, SurveyResponse};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::traits::KeyValueStore;
use crate::domain::photo::migrate_photo_value;

pub const PETS_KEY: &str = "cc_pets_v1";
pub const LOGS_KEY: &str = "cc_healthlogs_v1";
pub const SURVEY_KEY: &str = "cc_survey_v1";
pub const FEEDBACK_KEY: &str = "cc_feedback_v1";

/// Health logs keyed by pet ID, each list in append order
pub type HealthLogMap = BTreeMap<String, Vec<HealthLogEntry>>;

/// Shapes the health log slot has been written in over time
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredHealthLogs {
    /// `{ "<petId>": [{ date, text }, ...] }`
    Current(BTreeMap<String, Value>),
    /// `[{ petId, date, text }, ...]`
    LegacyFlat(Vec<Value>),
    Unrecognized(IgnoredAny),
}

#[derive(Debug, Deserialize)]
struct LegacyFlatEntry {
    #[serde(rename = "petId", alias = "pet_id")]
    pet_id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    text: String,
}

impl StoredHealthLogs {
    /// Normalize to the current shape; `None` when the shape is not recognized
    fn migrate(self) -> Option<HealthLogMap> {
        match self {
            StoredHealthLogs::Current(map) => Some(migrate_current(map)),
            StoredHealthLogs::LegacyFlat(entries) => Some(migrate_legacy_flat(entries)),
            StoredHealthLogs::Unrecognized(_) => None,
        }
    }
}

/// Ensure every value is a list of entries, dropping anything unreadable
fn migrate_current(map: BTreeMap<String, Value>) -> HealthLogMap {
    map.into_iter()
        .map(|(pet_id, value)| {
            let entries = match value {
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value::<HealthLogEntry>(item).ok())
                    .collect(),
                other => {
                    warn!("Health log for {} is not a list ({}), resetting it", pet_id, other);
                    Vec::new()
                }
            };
            (pet_id, entries)
        })
        .collect()
}

/// Group flat entries by their pet ID, preserving order within each pet
fn migrate_legacy_flat(entries: Vec<Value>) -> HealthLogMap {
    let mut logs = HealthLogMap::new();
    for item in entries {
        match serde_json::from_value::<LegacyFlatEntry>(item) {
            Ok(legacy) => logs.entry(legacy.pet_id).or_default().push(HealthLogEntry {
                date: legacy.date,
                text: legacy.text,
            }),
            Err(e) => warn!("Skipping unreadable legacy health log entry: {}", e),
        }
    }
    logs
}

/// Normalize a raw health log value. Exposed for idempotence checks.
pub fn migrate_health_logs(raw: Value) -> HealthLogMap {
    serde_json::from_value::<StoredHealthLogs>(raw)
        .ok()
        .and_then(StoredHealthLogs::migrate)
        .unwrap_or_default()
}

/// Parse each stored pet on its own so one unusable record does not take
/// the whole roster with it
fn parse_pet_records(records: Vec<Value>) -> Vec<Pet> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value::<Pet>(record) {
            Ok(pet) => Some(pet),
            Err(e) => {
                warn!("Skipping unreadable pet record at position {}: {}", position, e);
                None
            }
        })
        .collect()
}

/// Apply the photo path migration to every pet; true if anything changed
pub fn migrate_pet_photos(pets: &mut [Pet]) -> bool {
    let mut changed = false;
    for pet in pets.iter_mut() {
        if let Some(migrated) = migrate_photo_value(&pet.photo) {
            debug!("Migrating photo for pet {}: {} -> {}", pet.id, pet.photo, migrated);
            pet.photo = migrated;
            changed = true;
        }
    }
    changed
}

/// The three example pets shown on first run
pub fn default_pets(epoch_millis: u64) -> Vec<Pet> {
    let seed = |n: usize, name: &str, species: &str, diet: &str, notes: &str, photo: &str| Pet {
        id: Pet::generate_seed_id(epoch_millis, n),
        name: name.to_string(),
        species: species.to_string(),
        dob: String::new(),
        diet: diet.to_string(),
        notes: notes.to_string(),
        photo: photo.to_string(),
    };

    let mut pets = vec![
        seed(
            1,
            "Lincoln",
            "Dog",
            "Kibble every AM and PM",
            "Favors females over males, tends to have allergies in the spring.",
            "dogmyanimals.jpg",
        ),
        seed(2, "Charlie", "Cat", "Dry Food & Wet Food everyday", "Takes lots of naps.", "catmyanimals.jpg"),
        seed(3, "Goldie", "Fish", "Fish food once in the AM", "Very easy to take care of.", "fishmyanimals.jpg"),
    ];
    migrate_pet_photos(&mut pets);
    pets
}

/// Outcome of reading one slot
enum SlotRead<T> {
    Absent,
    /// Read failed or the content did not parse
    Unreadable,
    Present(T),
}

impl<T: Default> SlotRead<T> {
    fn unwrap_or_default(self) -> T {
        match self {
            SlotRead::Present(value) => value,
            SlotRead::Absent | SlotRead::Unreadable => T::default(),
        }
    }
}

/// StorageCodec reads and writes the site's JSON slots
#[derive(Clone)]
pub struct StorageCodec {
    store: Arc<dyn KeyValueStore>,
}

impl StorageCodec {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Serialize and overwrite a slot. Returns whether the write landed.
    async fn write_slot<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize storage slot {}: {}", key, e);
                return false;
            }
        };

        match self.store.put_value(key, &json).await {
            Ok(()) => {
                debug!("Saved storage slot {} ({} bytes)", key, json.len());
                true
            }
            Err(e) => {
                error!("Failed to save storage slot {}: {:?}", key, e);
                false
            }
        }
    }

    /// Read a slot and parse it as JSON
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> SlotRead<T> {
        let raw = match self.store.get_value(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return SlotRead::Absent,
            Err(e) => {
                error!("Failed to read storage slot {}: {:?}", key, e);
                return SlotRead::Unreadable;
            }
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => SlotRead::Present(value),
            Err(e) => {
                error!("Failed to parse storage slot {}: {}", key, e);
                SlotRead::Unreadable
            }
        }
    }

    /// Load pets, seeding defaults on first run and migrating legacy photo names
    pub async fn load_pets(&self) -> Vec<Pet> {
        match self.read_json::<Vec<Value>>(PETS_KEY).await {
            SlotRead::Absent => {
                let pets = default_pets(Utc::now().timestamp_millis() as u64);
                info!("No pets stored yet, seeding {} default pets", pets.len());
                self.write_slot(PETS_KEY, &pets).await;
                pets
            }
            SlotRead::Unreadable => default_pets(Utc::now().timestamp_millis() as u64),
            SlotRead::Present(records) => {
                let mut pets = parse_pet_records(records);
                if migrate_pet_photos(&mut pets) {
                    info!("Migrated legacy photo paths, saving pets");
                    self.write_slot(PETS_KEY, &pets).await;
                }
                pets
            }
        }
    }

    pub async fn save_pets(&self, pets: &[Pet]) -> bool {
        self.write_slot(PETS_KEY, pets).await
    }

    /// Load health logs, converting legacy shapes to the keyed mapping
    pub async fn load_health_logs(&self) -> HealthLogMap {
        let raw = match self.read_json::<Value>(LOGS_KEY).await {
            SlotRead::Absent | SlotRead::Unreadable => return HealthLogMap::new(),
            SlotRead::Present(raw) => raw,
        };

        let stored = match serde_json::from_value::<StoredHealthLogs>(raw.clone()) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Unreadable health log slot: {}", e);
                return HealthLogMap::new();
            }
        };

        let Some(logs) = stored.migrate() else {
            warn!("Unrecognized health log shape, starting with an empty log");
            return HealthLogMap::new();
        };

        let changed = serde_json::to_value(&logs).map(|normalized| normalized != raw).unwrap_or(false);
        if changed {
            info!("Normalized health log storage for {} pets, saving", logs.len());
            self.write_slot(LOGS_KEY, &logs).await;
        }

        logs
    }

    pub async fn save_health_logs(&self, logs: &HealthLogMap) -> bool {
        self.write_slot(LOGS_KEY, logs).await
    }

    pub async fn load_surveys(&self) -> Vec<SurveyResponse> {
        self.read_json(SURVEY_KEY).await.unwrap_or_default()
    }

    pub async fn save_surveys(&self, responses: &[SurveyResponse]) -> bool {
        self.write_slot(SURVEY_KEY, responses).await
    }

    pub async fn load_feedback(&self) -> Vec<FeedbackMessage> {
        self.read_json(FEEDBACK_KEY).await.unwrap_or_default()
    }

    pub async fn save_feedback(&self, messages: &[FeedbackMessage]) -> bool {
        self.write_slot(FEEDBACK_KEY, messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;
    use serde_json::json;

    fn setup_test() -> (StorageCodec, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (StorageCodec::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_empty_store_seeds_and_persists_default_pets() {
        let (codec, store) = setup_test();

        let pets = codec.load_pets().await;

        assert_eq!(pets.len(), 3);
        let names: Vec<&str> = pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Lincoln", "Charlie", "Goldie"]);
        assert!(pets.iter().all(|p| !p.id.is_empty()));
        assert_ne!(pets[0].id, pets[1].id);
        assert_ne!(pets[1].id, pets[2].id);
        assert_eq!(pets[0].photo, "images/dogmyanimals.jpg");

        let stored = store.get_value(PETS_KEY).await.unwrap().expect("defaults persisted");
        let stored: Vec<Pet> = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored, pets);

        // Second load returns the same records instead of reseeding
        assert_eq!(codec.load_pets().await, pets);
    }

    #[tokio::test]
    async fn test_malformed_pets_fall_back_to_defaults_without_overwriting() {
        let (codec, store) = setup_test();
        store.put_value(PETS_KEY, "{not json").await.unwrap();

        let pets = codec.load_pets().await;

        assert_eq!(pets.len(), 3);
        assert_eq!(store.get_value(PETS_KEY).await.unwrap(), Some("{not json".to_string()));
    }

    #[tokio::test]
    async fn test_legacy_photo_names_are_migrated_and_persisted() {
        let (codec, store) = setup_test();
        let legacy = json!([
            { "id": "pet-1", "name": "Rex", "species": "Dog", "photo": "rex.jpg" },
            { "id": "pet-2", "name": "Tom", "species": "Cat", "photo": "logo.png" }
        ]);
        store.put_value(PETS_KEY, &legacy.to_string()).await.unwrap();

        let pets = codec.load_pets().await;

        assert_eq!(pets[0].photo, "images/rex.jpg");
        assert_eq!(pets[1].photo, "logo.png");
        let stored: Vec<Pet> = serde_json::from_str(&store.get_value(PETS_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored[0].photo, "images/rex.jpg");
    }

    #[tokio::test]
    async fn test_null_fields_do_not_discard_stored_pets() {
        let (codec, store) = setup_test();
        let stored = json!([
            { "id": "pet-1", "name": "Rex", "species": "Dog", "diet": "Kibble", "photo": "rex.jpg", "dob": null },
            { "id": "pet-2", "name": "Tom", "species": "Cat" },
            { "id": "pet-3", "name": 5, "species": "Fish" }
        ]);
        store.put_value(PETS_KEY, &stored.to_string()).await.unwrap();

        let pets = codec.load_pets().await;

        let names: Vec<&str> = pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Rex", "Tom"]);
        assert_eq!(pets[0].dob, "");
        assert_eq!(pets[0].photo, "images/rex.jpg");
        assert_eq!(pets[1].photo, "");

        // The migrated roster is written back, still holding the user's pets
        let raw = store.get_value(PETS_KEY).await.unwrap().unwrap();
        assert!(raw.contains("Rex"));
        assert!(!raw.contains("Lincoln"));
    }

    #[tokio::test]
    async fn test_absent_health_logs_are_empty_and_not_written() {
        let (codec, store) = setup_test();

        assert!(codec.load_health_logs().await.is_empty());
        assert!(store.get_value(LOGS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_health_logs_yield_empty_mapping() {
        let (codec, store) = setup_test();
        store.put_value(LOGS_KEY, "[{oops").await.unwrap();

        assert!(codec.load_health_logs().await.is_empty());
    }

    #[tokio::test]
    async fn test_legacy_flat_health_logs_are_grouped_by_pet() {
        let (codec, store) = setup_test();
        let legacy = json!([{ "petId": "pet-1", "date": "2024-01-01", "text": "hi" }]);
        store.put_value(LOGS_KEY, &legacy.to_string()).await.unwrap();

        let logs = codec.load_health_logs().await;

        let expected = json!({ "pet-1": [{ "date": "2024-01-01", "text": "hi" }] });
        assert_eq!(serde_json::to_value(&logs).unwrap(), expected);

        // The converted form is written back so later loads skip migration
        let stored: Value = serde_json::from_str(&store.get_value(LOGS_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored, expected);
    }

    #[test]
    fn test_health_log_migration_is_idempotent() {
        let legacy = json!([
            { "petId": "pet-1", "date": "2024-01-01", "text": "Checkup" },
            { "petId": "pet-2", "date": "2024-01-03", "text": "Bath" },
            { "petId": "pet-1", "date": "2024-02-01", "text": "Vaccine" }
        ]);

        let once = migrate_health_logs(legacy);
        let twice = migrate_health_logs(serde_json::to_value(&once).unwrap());

        assert_eq!(once, twice);
        assert_eq!(once["pet-1"].len(), 2);
        assert_eq!(once["pet-1"][1].text, "Vaccine");
    }

    #[test]
    fn test_current_shape_values_are_forced_to_lists() {
        let raw = json!({
            "pet-1": [{ "date": "2024-01-01", "text": "ok" }, "garbage"],
            "pet-2": "not a list"
        });

        let logs = migrate_health_logs(raw);

        assert_eq!(logs["pet-1"].len(), 1);
        assert!(logs["pet-2"].is_empty());
    }

    #[test]
    fn test_unrecognized_shape_degrades_to_empty() {
        assert!(migrate_health_logs(json!(42)).is_empty());
        assert!(migrate_health_logs(json!("logs")).is_empty());
        assert!(migrate_health_logs(Value::Null).is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let store = Arc::new(MemoryStore::with_quota(8));
        let codec = StorageCodec::new(store.clone());

        let entry = SurveyResponse {
            id: "s_1".to_string(),
            date: "2024-01-01T00:00:00Z".to_string(),
            satisfaction: "5".to_string(),
            favorite: String::new(),
            suggestions: String::new(),
        };

        assert!(!codec.save_surveys(&[entry]).await);
        assert!(store.get_value(SURVEY_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_survey_and_feedback_slots_are_empty() {
        let (codec, store) = setup_test();
        store.put_value(SURVEY_KEY, "nope").await.unwrap();
        store.put_value(FEEDBACK_KEY, "{}").await.unwrap();

        assert!(codec.load_surveys().await.is_empty());
        assert!(codec.load_feedback().await.is_empty());
    }
}
