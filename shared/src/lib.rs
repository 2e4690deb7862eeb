use serde::{Deserialize, Deserializer, Serialize};

/// Folder that bare photo filenames are resolved against
pub const ASSET_FOLDER: &str = "images";

/// Image shown for pets without a photo of their own
pub const PLACEHOLDER_PHOTO: &str = "logo.png";

/// Pet profile exactly as it is persisted in the pets slot.
///
/// Every field defaults to an empty string so records written by older
/// versions of the site (which omitted `dob` or `photo`, or stored `null`)
/// still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Pet ID in format: "pet-<epoch_millis>" (seeded pets carry a "-<n>" suffix)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub species: String,
    /// Date of birth as entered in the form, empty when unknown
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dob: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub diet: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
    /// Embedded data URL, absolute URL, relative path or bare filename
    #[serde(default, deserialize_with = "null_as_empty")]
    pub photo: String,
}

/// Read a string field, treating `null` like an absent value
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single dated note in a pet's health log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthLogEntry {
    pub date: String,
    pub text: String,
}

/// One submitted satisfaction survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    /// Survey ID in format: "s_<epoch_millis>"
    pub id: String,
    /// Submission timestamp (RFC 3339)
    pub date: String,
    /// Star rating, "1" through "5"
    pub satisfaction: String,
    #[serde(default)]
    pub favorite: String,
    #[serde(default)]
    pub suggestions: String,
}

/// One community feedback message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    /// Feedback ID in format: "f_<epoch_millis>"
    pub id: String,
    /// Optional display name, empty for anonymous posts
    #[serde(default)]
    pub name: String,
    pub text: String,
    /// Submission timestamp (RFC 3339)
    pub date: String,
}

/// Pet as shown on the roster, with its photo already resolved to a renderable source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetCard {
    pub pet: Pet,
    pub photo_src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetListResponse {
    pub pets: Vec<PetCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePetRequest {
    pub name: String,
    pub species: String,
    pub dob: Option<String>,
    pub diet: Option<String>,
    pub notes: Option<String>,
    /// Image file contents as read by the browser ("data:<mime>;base64,<payload>")
    pub photo_data_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    pub dob: Option<String>,
    pub diet: Option<String>,
    pub notes: Option<String>,
    /// Replaces the current photo when present; the existing photo is kept otherwise
    pub photo_data_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetResponse {
    pub pet: PetCard,
    pub success_message: String,
    /// Set when a supplied photo could not be used and the pet was saved without it
    pub photo_notice: Option<String>,
}

/// Health log entry prepared for display.
///
/// `index` is the entry's position in storage (append order), which is what
/// update and delete requests must send back regardless of display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLogEntryRow {
    pub index: usize,
    pub date: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLogResponse {
    pub pet: PetCard,
    /// Newest first
    pub entries: Vec<HealthLogEntryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLogEntryRequest {
    pub date: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLogMutationResponse {
    /// Newest first
    pub entries: Vec<HealthLogEntryRow>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitSurveyRequest {
    pub satisfaction: String,
    pub favorite: Option<String>,
    pub suggestions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitSurveyResponse {
    pub response: SurveyResponse,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyListResponse {
    pub responses: Vec<SurveyResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFeedbackRequest {
    pub name: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFeedbackResponse {
    pub message: FeedbackMessage,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackListResponse {
    /// Newest first
    pub messages: Vec<FeedbackMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validation result for the registration form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationValidationResult {
    pub is_valid: bool,
    pub errors: Vec<RegistrationError>,
}

/// Specific registration validation errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistrationError {
    UsernameTooShort,
    InvalidEmail,
    PasswordTooShort,
    PasswordMismatch,
}

impl RegistrationError {
    /// Message shown next to the form
    pub fn message(&self) -> &'static str {
        match self {
            RegistrationError::UsernameTooShort => "Username must be at least 3 characters long.",
            RegistrationError::InvalidEmail => "Please enter a valid email address.",
            RegistrationError::PasswordTooShort => "Password must be at least 6 characters long.",
            RegistrationError::PasswordMismatch => "Passwords do not match.",
        }
    }
}

/// Log line forwarded by the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

impl Pet {
    /// Generate a pet ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("pet-{}", epoch_millis)
    }

    /// Generate the ID of the n-th seeded pet
    pub fn generate_seed_id(epoch_millis: u64, n: usize) -> String {
        format!("pet-{}-{}", epoch_millis, n)
    }
}

impl SurveyResponse {
    /// Generate a survey response ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("s_{}", epoch_millis)
    }
}

impl FeedbackMessage {
    /// Generate a feedback message ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("f_{}", epoch_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ids() {
        assert_eq!(Pet::generate_id(1702516122000), "pet-1702516122000");
        assert_eq!(Pet::generate_seed_id(1702516122000, 2), "pet-1702516122000-2");
        assert_eq!(SurveyResponse::generate_id(1702516122000), "s_1702516122000");
        assert_eq!(FeedbackMessage::generate_id(1702516122000), "f_1702516122000");
    }

    #[test]
    fn test_pet_tolerates_missing_fields() {
        let pet: Pet = serde_json::from_str(r#"{"id":"pet-1","name":"Rex","species":"Dog"}"#).unwrap();
        assert_eq!(pet.id, "pet-1");
        assert_eq!(pet.dob, "");
        assert_eq!(pet.photo, "");
    }

    #[test]
    fn test_pet_null_fields_read_as_empty() {
        let pet: Pet = serde_json::from_str(
            r#"{"id":"pet-1","name":"Rex","species":"Dog","dob":null,"photo":null}"#,
        )
        .unwrap();
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.dob, "");
        assert_eq!(pet.photo, "");
    }

    #[test]
    fn test_pet_stored_shape() {
        let pet = Pet {
            id: "pet-1".to_string(),
            name: "Rex".to_string(),
            species: "Dog".to_string(),
            dob: String::new(),
            diet: "Kibble".to_string(),
            notes: String::new(),
            photo: "images/rex.jpg".to_string(),
        };
        let value = serde_json::to_value(&pet).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in ["id", "name", "species", "dob", "diet", "notes", "photo"] {
            assert!(keys.contains(&key), "missing key {}", key);
        }
    }

    #[test]
    fn test_health_log_entry_ignores_legacy_title() {
        let entry: HealthLogEntry =
            serde_json::from_str(r#"{"date":"2024-01-01","text":"Checkup","title":""}"#).unwrap();
        assert_eq!(entry.text, "Checkup");
    }

    #[test]
    fn test_registration_error_messages() {
        assert_eq!(RegistrationError::PasswordMismatch.message(), "Passwords do not match.");
        assert_eq!(
            RegistrationError::UsernameTooShort.message(),
            "Username must be at least 3 characters long."
        );
    }
}
