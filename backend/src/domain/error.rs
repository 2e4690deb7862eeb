use thiserror::Error;

pub type DomainResult<T> = core::result::Result<T, DomainError>;

/// Failures a domain operation reports to its caller.
///
/// Storage problems never show up here: loads fall back to defaults and
/// failed writes are logged by the codec.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("Pet not found: {0}")]
    PetNotFound(String),
    #[error("Health log entry {index} not found for pet {pet_id}")]
    EntryNotFound { pet_id: String, index: usize },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}
