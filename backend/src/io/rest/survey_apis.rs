//! # REST API for the Satisfaction Survey

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::domain_error_response;
use crate::AppState;
use shared::{SubmitSurveyRequest, SubmitSurveyResponse, SurveyListResponse};

/// List recorded responses in submission order
pub async fn list_survey_responses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/survey");

    let responses = state.survey_service.list().await;
    (StatusCode::OK, Json(SurveyListResponse { responses })).into_response()
}

/// Record a survey response
pub async fn submit_survey(
    State(state): State<AppState>,
    Json(request): Json<SubmitSurveyRequest>,
) -> impl IntoResponse {
    info!("POST /api/survey - request: {:?}", request);

    match state.survey_service.submit(request).await {
        Ok(response) => {
            let body = SubmitSurveyResponse {
                response,
                success_message: "Thanks, your response was recorded.".to_string(),
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(e) => domain_error_response("Failed to record survey response", e),
    }
}
