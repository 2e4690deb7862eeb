//! # Storage Module
//!
//! Handles all data persistence for the Creature Comfort site.
//!
//! Everything the site remembers lives in four JSON blobs inside a
//! string-keyed store: pets, health logs, survey responses and feedback.
//!
//! ## Layers
//!
//! - **traits**: the [`KeyValueStore`] abstraction
//! - **db** / **memory**: SQLite-backed and in-memory stores
//! - **codec**: JSON encoding per slot, defaults, legacy migrations
//! - **repositories**: in-memory collections that write through the codec

pub mod traits;
pub mod db;
pub mod memory;
pub mod codec;
pub mod repositories;

pub use traits::{KeyValueStore, StorageError};
pub use db::DbConnection;
pub use memory::MemoryStore;
pub use codec::StorageCodec;
pub use repositories::{FeedbackRepository, HealthLogRepository, PetRepository, SurveyRepository};
