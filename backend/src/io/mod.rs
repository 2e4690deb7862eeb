//! # IO Module
//!
//! Adapter layer between the browser and the domain services.
//!
//! Handlers translate JSON requests into domain calls and domain results
//! into JSON responses with matching status codes. No business rule lives
//! here beyond the checks that only make sense at the HTTP edge, such as
//! refusing to touch the health log of a pet that does not exist.
//!
//! ## Endpoints
//!
//! - **/api/pets**: Roster listing, add, get, update, delete
//! - **/api/pets/:pet_id/health-log**: Per-pet log view and edits
//! - **/api/survey**, **/api/feedback**: Append-only submissions
//! - **/api/registration/validate**: Sign-up form checks
//! - **/api/logs**: Frontend log forwarding

pub mod rest;

pub use rest::*;
