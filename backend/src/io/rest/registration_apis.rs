//! # REST API for Sign-up Form Validation

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::AppState;
use shared::RegistrationRequest;

/// Check a registration form. Always 200; the body says whether it passed.
pub async fn validate_registration(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> impl IntoResponse {
    // Passwords stay out of the log
    info!("POST /api/registration/validate - username: {}", request.username);

    let result = state.registration_service.validate(&request);
    (StatusCode::OK, Json(result)).into_response()
}
