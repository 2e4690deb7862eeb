//! # REST API Interface Layer
//!
//! HTTP endpoints for the pet-care site.
//!
//! Each `*_apis` module holds the handlers for one resource. Mappers in
//! [`mappers`] convert domain models into the shared DTOs the frontend
//! consumes. Domain errors are translated to status codes in one place,
//! [`domain_error_response`], so every handler answers the same way.

pub mod mappers;
pub mod pet_apis;
pub mod health_log_apis;
pub mod survey_apis;
pub mod feedback_apis;
pub mod registration_apis;
pub mod logging_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::domain::DomainError;

pub use pet_apis::*;
pub use health_log_apis::*;
pub use survey_apis::*;
pub use feedback_apis::*;
pub use registration_apis::*;
pub use logging_apis::*;

/// Status code a domain error maps to
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::PetNotFound(_) | DomainError::EntryNotFound { .. } => StatusCode::NOT_FOUND,
    }
}

/// Translate a domain error into an HTTP response carrying its message
pub fn domain_error_response(context: &str, error: DomainError) -> Response {
    warn!("{}: {}", context, error);
    (status_for(&error), error.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_domain_errors() {
        assert_eq!(status_for(&DomainError::validation("bad")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&DomainError::PetNotFound("pet-1".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::EntryNotFound {
                pet_id: "pet-1".to_string(),
                index: 3
            }),
            StatusCode::NOT_FOUND
        );
    }
}
