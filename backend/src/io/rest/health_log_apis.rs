//! # REST API for Pet Health Logs
//!
//! Every change runs through the pet service, which checks that the pet
//! exists while holding the roster, so an unknown or just-deleted pet is
//! answered with 404 instead of leaving a log nobody can reach. Entries are
//! addressed by their storage index, which the view returns alongside each
//! row.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::domain_error_response;
use super::mappers::health_log_mapper::HealthLogMapper;
use super::mappers::pet_mapper::PetMapper;
use crate::domain::IndexedEntry;
use crate::AppState;
use shared::{HealthLogEntryRequest, HealthLogMutationResponse, HealthLogResponse};

fn mutation_response(entries: Vec<IndexedEntry>, message: &str) -> HealthLogMutationResponse {
    HealthLogMutationResponse {
        entries: HealthLogMapper::to_rows(entries),
        success_message: message.to_string(),
    }
}

/// Pet card plus its log, newest first
pub async fn get_health_log(
    State(state): State<AppState>,
    Path(pet_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/pets/{}/health-log", pet_id);

    match state.pet_service.health_log(&pet_id).await {
        Ok((pet, entries)) => {
            let response = HealthLogResponse {
                pet: PetMapper::to_card(pet),
                entries: HealthLogMapper::to_rows(entries),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response("Failed to get health log", e),
    }
}

/// Append an entry to a pet's log
pub async fn append_health_log_entry(
    State(state): State<AppState>,
    Path(pet_id): Path<String>,
    Json(request): Json<HealthLogEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/pets/{}/health-log - request: {:?}", pet_id, request);

    match state.pet_service.append_log_entry(&pet_id, request).await {
        Ok(entries) => {
            let response = mutation_response(entries, "Health log entry added.");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => domain_error_response("Failed to add health log entry", e),
    }
}

/// Replace the entry at a storage index
pub async fn update_health_log_entry(
    State(state): State<AppState>,
    Path((pet_id, index)): Path<(String, usize)>,
    Json(request): Json<HealthLogEntryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/pets/{}/health-log/{} - request: {:?}", pet_id, index, request);

    match state.pet_service.update_log_entry(&pet_id, index, request).await {
        Ok(entries) => {
            let response = mutation_response(entries, "Health log entry updated.");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response("Failed to update health log entry", e),
    }
}

/// Delete the entry at a storage index
pub async fn delete_health_log_entry(
    State(state): State<AppState>,
    Path((pet_id, index)): Path<(String, usize)>,
) -> impl IntoResponse {
    info!("DELETE /api/pets/{}/health-log/{}", pet_id, index);

    match state.pet_service.remove_log_entry(&pet_id, index).await {
        Ok(entries) => {
            let response = mutation_response(entries, "Health log entry deleted.");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response("Failed to delete health log entry", e),
    }
}
