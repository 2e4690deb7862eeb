use shared::SurveyResponse;
use tokio::sync::Mutex;
use tracing::info;

use crate::storage::codec::StorageCodec;
use super::unique_id;

/// Append-only list of survey responses
pub struct SurveyRepository {
    codec: StorageCodec,
    responses: Mutex<Vec<SurveyResponse>>,
}

impl SurveyRepository {
    pub async fn load(codec: StorageCodec) -> Self {
        let responses = codec.load_surveys().await;
        info!("Loaded {} survey responses", responses.len());

        Self {
            codec,
            responses: Mutex::new(responses),
        }
    }

    pub async fn list(&self) -> Vec<SurveyResponse> {
        self.responses.lock().await.clone()
    }

    /// Append a response under a fresh ID derived from `epoch_millis`
    pub async fn append(&self, mut response: SurveyResponse, epoch_millis: u64) -> SurveyResponse {
        let mut responses = self.responses.lock().await;

        response.id = unique_id(SurveyResponse::generate_id(epoch_millis), |id| {
            responses.iter().any(|r| r.id == id)
        });
        responses.push(response.clone());
        self.codec.save_surveys(&responses).await;
        response
    }
}
