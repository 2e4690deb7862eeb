//! # REST API for the Pet Roster
//!
//! Endpoints for listing, adding, reading, updating and deleting pets.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::domain_error_response;
use super::mappers::pet_mapper::PetMapper;
use crate::AppState;
use shared::{CreatePetRequest, UpdatePetRequest};

/// List all pets with resolved photo sources
pub async fn list_pets(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/pets");

    let pets = state.pet_service.list().await;
    (StatusCode::OK, Json(PetMapper::to_pet_list_dto(pets))).into_response()
}

/// Add a pet
pub async fn create_pet(
    State(state): State<AppState>,
    Json(request): Json<CreatePetRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/pets - name: {}, species: {}, photo supplied: {}",
        request.name,
        request.species,
        request.photo_data_url.is_some()
    );

    match state.pet_service.add(request).await {
        Ok(change) => {
            let message = format!("{} was added to your pets.", change.pet.name);
            let response = PetMapper::to_pet_response_dto(change, &message);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => domain_error_response("Failed to add pet", e),
    }
}

/// Get a pet by ID
pub async fn get_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/pets/{}", pet_id);

    match state.pet_service.get(&pet_id).await {
        Ok(pet) => (StatusCode::OK, Json(PetMapper::to_card(pet))).into_response(),
        Err(e) => domain_error_response("Failed to get pet", e),
    }
}

/// Update a pet's fields, keeping the photo unless a new one is supplied
pub async fn update_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<String>,
    Json(request): Json<UpdatePetRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/pets/{} - photo supplied: {}",
        pet_id,
        request.photo_data_url.is_some()
    );

    match state.pet_service.update(&pet_id, request).await {
        Ok(change) => {
            let message = format!("{} was updated.", change.pet.name);
            let response = PetMapper::to_pet_response_dto(change, &message);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response("Failed to update pet", e),
    }
}

/// Delete a pet and its health log
pub async fn delete_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/pets/{}", pet_id);

    match state.pet_service.remove(&pet_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response("Failed to delete pet", e),
    }
}
