//! # Creature Comfort Backend
//!
//! Serves the pet-care site: the pet roster with per-pet health logs, the
//! satisfaction survey, community feedback, and sign-up form checks.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (Yew frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business rules, services)
//!     ↓
//! Storage Layer (Named JSON slots in a key-value store)
//! ```
//!
//! Every collection lives in one named slot. Repositories load their slot
//! once at startup, keep the collection in memory, and write the whole slot
//! back after each change.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

pub use config::AppConfig;
use domain::photo::MAX_PHOTO_BYTES;
use domain::{FeedbackService, PetService, RegistrationService, SurveyService};
use storage::{
    DbConnection, FeedbackRepository, HealthLogRepository, KeyValueStore, PetRepository,
    StorageCodec, SurveyRepository,
};

/// Request body limit. Leaves room for a base64 photo well past
/// `MAX_PHOTO_BYTES`, which the pet service answers with a photo notice.
pub const MAX_REQUEST_BYTES: usize = 4 * MAX_PHOTO_BYTES;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub pet_service: PetService,
    pub survey_service: SurveyService,
    pub feedback_service: FeedbackService,
    pub registration_service: RegistrationService,
}

impl AppState {
    /// Load every collection from `store` and wire up the services
    pub async fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        let codec = StorageCodec::new(store);

        info!("Loading collections");
        let pets = Arc::new(PetRepository::load(codec.clone()).await);
        let health_logs = Arc::new(HealthLogRepository::load(codec.clone()).await);
        let surveys = Arc::new(SurveyRepository::load(codec.clone()).await);
        let feedback = Arc::new(FeedbackRepository::load(codec).await);

        info!("Setting up domain model");
        Self {
            pet_service: PetService::new(pets, health_logs),
            survey_service: SurveyService::new(surveys),
            feedback_service: FeedbackService::new(feedback),
            registration_service: RegistrationService::new(),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    Ok(AppState::from_store(Arc::new(db_conn)).await)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    // CORS setup to allow a separately served frontend to make requests
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin: {}", config.allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route("/pets", get(io::list_pets).post(io::create_pet))
        .route(
            "/pets/:pet_id",
            get(io::get_pet).put(io::update_pet).delete(io::delete_pet),
        )
        .route(
            "/pets/:pet_id/health-log",
            get(io::get_health_log).post(io::append_health_log_entry),
        )
        .route(
            "/pets/:pet_id/health-log/:index",
            put(io::update_health_log_entry).delete(io::delete_health_log_entry),
        )
        .route("/survey", get(io::list_survey_responses).post(io::submit_survey))
        .route("/feedback", get(io::list_feedback).post(io::post_feedback))
        .route("/registration/validate", post(io::validate_registration))
        .route("/logs", post(io::log_message));

    // Define our main application router
    Ok(Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};
    use shared::{
        FeedbackListResponse, HealthLogMutationResponse, HealthLogResponse, PetCard,
        PetListResponse, PetResponse, RegistrationValidationResult, SurveyListResponse,
    };
    use std::path::PathBuf;
    use storage::MemoryStore;
    use tower::ServiceExt;

    fn test_config(static_dir: PathBuf) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            bind: "127.0.0.1:0".parse().unwrap(),
            static_dir,
            allowed_origin: "http://localhost:8080".to_string(),
        }
    }

    async fn setup_test() -> Router {
        let state = AppState::from_store(Arc::new(MemoryStore::new())).await;
        create_router(state, &test_config(PathBuf::from("does-not-exist")))
            .expect("Failed to build router")
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
        serde_json::from_slice(bytes).expect("Response was not the expected JSON")
    }

    async fn first_pet_id(app: &Router) -> String {
        let (_, body) = send(app, "GET", "/api/pets", None).await;
        parse::<PetListResponse>(&body).pets[0].pet.id.clone()
    }

    #[tokio::test]
    async fn test_roster_starts_with_seeded_pets() {
        let app = setup_test().await;

        let (status, body) = send(&app, "GET", "/api/pets", None).await;

        assert_eq!(status, StatusCode::OK);
        let list: PetListResponse = parse(&body);
        assert_eq!(list.pets.len(), 3);
        assert_eq!(list.pets[0].pet.name, "Lincoln");
        assert_eq!(list.pets[0].photo_src, "images/dogmyanimals.jpg");
    }

    #[tokio::test]
    async fn test_add_update_delete_pet() {
        let app = setup_test().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/pets",
            Some(json!({"name": "Clover", "species": "Rabbit", "diet": "Hay"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: PetResponse = parse(&body);
        assert_eq!(created.pet.photo_src, "logo.png");
        let pet_id = created.pet.pet.id.clone();

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/pets/{}", pet_id),
            Some(json!({"notes": "Shy"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<PetResponse>(&body).pet.pet.notes, "Shy");

        let (status, body) = send(&app, "GET", &format!("/api/pets/{}", pet_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<PetCard>(&body).pet.diet, "Hay");

        let (status, _) = send(&app, "DELETE", &format!("/api/pets/{}", pet_id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &format!("/api/pets/{}", pet_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_pet_validation_and_photo_notice() {
        let app = setup_test().await;

        let (status, body) = send(&app, "POST", "/api/pets", Some(json!({"name": " ", "species": "Cat"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "Please enter at least a pet name and species."
        );

        let (status, body) = send(
            &app,
            "POST",
            "/api/pets",
            Some(json!({"name": "Tom", "species": "Cat", "photo_data_url": "data:text/plain;base64,aGk="})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: PetResponse = parse(&body);
        assert!(created.photo_notice.is_some());
        assert_eq!(created.pet.photo_src, "logo.png");
    }

    #[tokio::test]
    async fn test_large_photo_uploads_reach_the_pet_service() {
        let app = setup_test().await;

        // 1.2 MB decoded, within the photo limit
        let within_limit = format!("data:image/png;base64,{}", "A".repeat(1_600_000));
        let (status, body) = send(
            &app,
            "POST",
            "/api/pets",
            Some(json!({"name": "Clover", "species": "Rabbit", "photo_data_url": within_limit})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: PetResponse = parse(&body);
        assert!(created.photo_notice.is_none());
        assert_eq!(created.pet.photo_src, within_limit);

        // 3 MiB decoded, past the photo limit: saved with the placeholder
        let oversized = format!("data:image/png;base64,{}", "A".repeat(4 * 1024 * 1024));
        let (status, body) = send(
            &app,
            "POST",
            "/api/pets",
            Some(json!({"name": "Tom", "species": "Cat", "photo_data_url": oversized})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: PetResponse = parse(&body);
        assert_eq!(
            created.photo_notice.as_deref(),
            Some("Could not read photo file - pet saved without photo.")
        );
        assert_eq!(created.pet.photo_src, "logo.png");

        let (_, body) = send(&app, "GET", "/api/pets", None).await;
        assert_eq!(parse::<PetListResponse>(&body).pets.len(), 5);
    }

    #[tokio::test]
    async fn test_health_log_flow() {
        let app = setup_test().await;
        let pet_id = first_pet_id(&app).await;
        let log_uri = format!("/api/pets/{}/health-log", pet_id);

        for (date, text) in [("2024-01-01", "Checkup"), ("2024-02-01", "Vaccine")] {
            let (status, _) = send(&app, "POST", &log_uri, Some(json!({"date": date, "text": text}))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, "GET", &log_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let log: HealthLogResponse = parse(&body);
        assert_eq!(log.pet.pet.id, pet_id);
        assert_eq!(log.entries[0].text, "Vaccine");
        assert_eq!(log.entries[0].index, 1);

        let (status, body) = send(
            &app,
            "PUT",
            &format!("{}/0", log_uri),
            Some(json!({"date": "2024-01-02", "text": "Annual checkup"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated: HealthLogMutationResponse = parse(&body);
        assert_eq!(updated.entries[1].text, "Annual checkup");
        assert_eq!(updated.entries[0].text, "Vaccine");

        let (status, body) = send(&app, "DELETE", &format!("{}/1", log_uri), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<HealthLogMutationResponse>(&body).entries.len(), 1);

        let (status, _) = send(&app, "DELETE", &format!("{}/7", log_uri), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "POST", &log_uri, Some(json!({"date": "", "text": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_log_requires_known_pet() {
        let app = setup_test().await;

        let (status, _) = send(&app, "GET", "/api/pets/pet-missing/health-log", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            "/api/pets/pet-missing/health-log",
            Some(json!({"date": "2024-01-01", "text": "Checkup"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deleting_pet_removes_its_log() {
        let app = setup_test().await;
        let pet_id = first_pet_id(&app).await;
        let log_uri = format!("/api/pets/{}/health-log", pet_id);
        send(&app, "POST", &log_uri, Some(json!({"date": "2024-01-01", "text": "Checkup"}))).await;

        let (status, _) = send(&app, "DELETE", &format!("/api/pets/{}", pet_id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &log_uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_survey_and_feedback() {
        let app = setup_test().await;

        let (status, _) = send(&app, "POST", "/api/survey", Some(json!({"satisfaction": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/api/survey",
            Some(json!({"satisfaction": "5", "favorite": "Health log", "suggestions": null})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, body) = send(&app, "GET", "/api/survey", None).await;
        assert_eq!(parse::<SurveyListResponse>(&body).responses[0].satisfaction, "5");

        send(&app, "POST", "/api/feedback", Some(json!({"name": "Sam", "text": "First"}))).await;
        send(&app, "POST", "/api/feedback", Some(json!({"text": "Second"}))).await;
        let (status, body) = send(&app, "GET", "/api/feedback", None).await;
        assert_eq!(status, StatusCode::OK);
        let messages = parse::<FeedbackListResponse>(&body).messages;
        assert_eq!(messages[0].text, "Second");
        assert_eq!(messages[1].name, "Sam");
    }

    #[tokio::test]
    async fn test_registration_validation_endpoint() {
        let app = setup_test().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/registration/validate",
            Some(json!({
                "username": "al",
                "email": "al@example.com",
                "password": "secret1",
                "confirm_password": "secret1"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result: RegistrationValidationResult = parse(&body);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_log_forwarding() {
        let app = setup_test().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/logs",
            Some(json!({"level": "warn", "message": "photo read failed", "component": "roster"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<Value>(&body), json!({"success": true}));
    }

    #[tokio::test]
    async fn test_static_fallback_serves_frontend() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Creature Comfort</h1>").unwrap();
        let state = AppState::from_store(Arc::new(MemoryStore::new())).await;
        let app = create_router(state, &test_config(dir.path().to_path_buf())).unwrap();

        let (status, body) = send(&app, "GET", "/index.html", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap(), "<h1>Creature Comfort</h1>");
    }

    #[tokio::test]
    async fn test_invalid_origin_is_rejected() {
        let state = AppState::from_store(Arc::new(MemoryStore::new())).await;
        let mut config = test_config(PathBuf::from("dist"));
        config.allowed_origin = "bad\norigin".to_string();

        assert!(create_router(state, &config).is_err());
    }

    #[tokio::test]
    async fn test_initialize_backend_persists_to_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(PathBuf::from("dist"));
        config.database_url = format!("sqlite:{}", dir.path().join("test.db").display());

        let state = initialize_backend(&config).await.expect("Failed to initialize backend");
        let pets = state.pet_service.list().await;

        let reopened = initialize_backend(&config).await.unwrap();
        assert_eq!(reopened.pet_service.list().await, pets);
    }
}
