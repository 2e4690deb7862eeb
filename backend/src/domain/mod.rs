//! # Domain Module
//!
//! Contains the business rules of the pet-care site.
//!
//! This module knows what a pet, a health log entry, a survey response and a
//! feedback message are, which inputs are acceptable, and what has to happen
//! together (deleting a pet also drops its health log). It does not know how
//! the collections are persisted or how they are served.
//!
//! ## Module Organization
//!
//! - **pet_service**: Pet roster add/update/remove, photo handling, cascade delete
//! - **health_log_service**: Per-pet log entries addressed by storage index
//! - **survey_service**: Append-only satisfaction survey
//! - **feedback_service**: Append-only community messages
//! - **registration_service**: Sign-up form validation
//! - **photo**: Stored photo values, their migration and resolution, upload decoding
//!
//! ## Business Rules
//!
//! - A pet needs a name and a species; everything else is optional
//! - A failed photo upload never blocks saving the pet
//! - Health log entries need a date and a note
//! - Log entries are stored oldest first and displayed newest first
//! - Survey responses need a rating from 1 to 5
//! - Feedback needs a message; the name may be left blank

pub mod error;
pub mod models;
pub mod photo;
pub mod pet_service;
pub mod health_log_service;
pub mod survey_service;
pub mod feedback_service;
pub mod registration_service;

pub use error::{DomainError, DomainResult};
pub use models::health_log::IndexedEntry;
pub use models::pet::Pet;
pub use photo::{PetPhoto, PhotoReader, PhotoReadError};
pub use pet_service::{PetChange, PetService};
pub use health_log_service::HealthLogService;
pub use survey_service::SurveyService;
pub use feedback_service::FeedbackService;
pub use registration_service::RegistrationService;
