use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::info;

use crate::domain::error::{DomainError, DomainResult};
use crate::storage::SurveyRepository;
use shared::{SubmitSurveyRequest, SurveyResponse};

const MISSING_RATING: &str = "Please select a satisfaction rating.";

/// Service for the satisfaction survey
#[derive(Clone)]
pub struct SurveyService {
    repository: Arc<SurveyRepository>,
}

impl SurveyService {
    pub fn new(repository: Arc<SurveyRepository>) -> Self {
        Self { repository }
    }

    /// All responses in submission order
    pub async fn list(&self) -> Vec<SurveyResponse> {
        self.repository.list().await
    }

    /// Record a response
    pub async fn submit(&self, request: SubmitSurveyRequest) -> DomainResult<SurveyResponse> {
        let satisfaction = request.satisfaction.trim();
        if !matches!(satisfaction, "1" | "2" | "3" | "4" | "5") {
            return Err(DomainError::validation(MISSING_RATING));
        }

        let now = Utc::now();
        let response = SurveyResponse {
            id: String::new(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            satisfaction: satisfaction.to_string(),
            favorite: request.favorite.unwrap_or_default().trim().to_string(),
            suggestions: request.suggestions.unwrap_or_default().trim().to_string(),
        };

        let response = self
            .repository
            .append(response, now.timestamp_millis() as u64)
            .await;
        info!("Recorded survey response {} ({} stars)", response.id, response.satisfaction);
        Ok(response)
    }
}
