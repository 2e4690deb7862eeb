//! # REST API for Community Feedback

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::domain_error_response;
use crate::AppState;
use shared::{FeedbackListResponse, PostFeedbackRequest, PostFeedbackResponse};

/// List messages, newest first
pub async fn list_feedback(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/feedback");

    let messages = state.feedback_service.list_for_display().await;
    (StatusCode::OK, Json(FeedbackListResponse { messages })).into_response()
}

/// Post a message
pub async fn post_feedback(
    State(state): State<AppState>,
    Json(request): Json<PostFeedbackRequest>,
) -> impl IntoResponse {
    info!("POST /api/feedback - request: {:?}", request);

    match state.feedback_service.post(request).await {
        Ok(message) => {
            let body = PostFeedbackResponse {
                message,
                success_message: "Thanks for sharing!".to_string(),
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(e) => domain_error_response("Failed to post feedback", e),
    }
}
