use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    CreatePetRequest, FeedbackListResponse, HealthLogEntryRequest, HealthLogMutationResponse,
    HealthLogResponse, PetListResponse, PetResponse, PostFeedbackRequest, PostFeedbackResponse,
    RegistrationRequest, RegistrationValidationResult, SubmitSurveyRequest, SubmitSurveyResponse,
    UpdatePetRequest,
};

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Turn a response into its JSON body, or the server's error text
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(error_text)
        }
    }

    /// Get the pet roster
    pub async fn list_pets(&self) -> Result<PetListResponse, String> {
        match Request::get(&self.url("/pets")).send().await {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Failed to fetch pets: {}", e)),
        }
    }

    /// Add a pet
    pub async fn create_pet(&self, request: CreatePetRequest) -> Result<PetResponse, String> {
        match Request::post(&self.url("/pets"))
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Update a pet
    pub async fn update_pet(&self, pet_id: &str, request: UpdatePetRequest) -> Result<PetResponse, String> {
        match Request::put(&self.url(&format!("/pets/{}", pet_id)))
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Delete a pet and its health log
    pub async fn delete_pet(&self, pet_id: &str) -> Result<(), String> {
        match Request::delete(&self.url(&format!("/pets/{}", pet_id))).send().await {
            Ok(response) if response.ok() => Ok(()),
            Ok(response) => Err(response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string())),
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Get a pet's card and its health log, newest first
    pub async fn get_health_log(&self, pet_id: &str) -> Result<HealthLogResponse, String> {
        match Request::get(&self.url(&format!("/pets/{}/health-log", pet_id))).send().await {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Failed to fetch health log: {}", e)),
        }
    }

    /// Append a health log entry
    pub async fn add_health_log_entry(
        &self,
        pet_id: &str,
        request: HealthLogEntryRequest,
    ) -> Result<HealthLogMutationResponse, String> {
        match Request::post(&self.url(&format!("/pets/{}/health-log", pet_id)))
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Replace the health log entry stored at `index`
    pub async fn update_health_log_entry(
        &self,
        pet_id: &str,
        index: usize,
        request: HealthLogEntryRequest,
    ) -> Result<HealthLogMutationResponse, String> {
        match Request::put(&self.url(&format!("/pets/{}/health-log/{}", pet_id, index)))
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Delete the health log entry stored at `index`
    pub async fn delete_health_log_entry(
        &self,
        pet_id: &str,
        index: usize,
    ) -> Result<HealthLogMutationResponse, String> {
        match Request::delete(&self.url(&format!("/pets/{}/health-log/{}", pet_id, index)))
            .send()
            .await
        {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Submit the satisfaction survey
    pub async fn submit_survey(&self, request: SubmitSurveyRequest) -> Result<SubmitSurveyResponse, String> {
        match Request::post(&self.url("/survey"))
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Get community feedback, newest first
    pub async fn list_feedback(&self) -> Result<FeedbackListResponse, String> {
        match Request::get(&self.url("/feedback")).send().await {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Failed to fetch feedback: {}", e)),
        }
    }

    /// Post a feedback message
    pub async fn post_feedback(&self, request: PostFeedbackRequest) -> Result<PostFeedbackResponse, String> {
        match Request::post(&self.url("/feedback"))
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Check the registration form
    pub async fn validate_registration(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationValidationResult, String> {
        match Request::post(&self.url("/registration/validate"))
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
