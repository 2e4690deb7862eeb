use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{debug, error, info, warn};

use crate::AppState;
use shared::{LogEntry, LogResponse};

/// Forward a frontend log line into the backend's log
pub async fn log_message(
    State(_app_state): State<AppState>,
    Json(request): Json<LogEntry>,
) -> Result<Json<LogResponse>, StatusCode> {
    let component = request.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, request.message);

    match request.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "info" => info!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message), // Default to info for unknown levels
    }

    Ok(Json(LogResponse { success: true }))
}
