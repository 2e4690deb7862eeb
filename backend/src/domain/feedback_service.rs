use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::info;

use crate::domain::error::{DomainError, DomainResult};
use crate::storage::FeedbackRepository;
use shared::{FeedbackMessage, PostFeedbackRequest};

const MISSING_MESSAGE: &str = "Please enter a message.";

/// Service for community feedback messages
#[derive(Clone)]
pub struct FeedbackService {
    repository: Arc<FeedbackRepository>,
}

impl FeedbackService {
    pub fn new(repository: Arc<FeedbackRepository>) -> Self {
        Self { repository }
    }

    /// Messages as the preview shows them, newest first
    pub async fn list_for_display(&self) -> Vec<FeedbackMessage> {
        let mut messages = self.repository.list().await;
        messages.reverse();
        messages
    }

    /// Post a message. The name is optional, the text is not.
    pub async fn post(&self, request: PostFeedbackRequest) -> DomainResult<FeedbackMessage> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(DomainError::validation(MISSING_MESSAGE));
        }

        let now = Utc::now();
        let message = FeedbackMessage {
            id: String::new(),
            name: request.name.unwrap_or_default().trim().to_string(),
            text: text.to_string(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let message = self
            .repository
            .append(message, now.timestamp_millis() as u64)
            .await;
        info!("Posted feedback message {}", message.id);
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageCodec};

    async fn setup_test() -> FeedbackService {
        let codec = StorageCodec::new(Arc::new(MemoryStore::new()));
        FeedbackService::new(Arc::new(FeedbackRepository::load(codec).await))
    }

    fn request(name: Option<&str>, text: &str) -> PostFeedbackRequest {
        PostFeedbackRequest {
            name: name.map(str::to_string),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_post_and_list_newest_first() {
        let service = setup_test().await;

        service.post(request(Some("Sam"), "Love the site")).await.unwrap();
        service.post(request(None, "More cats please")).await.unwrap();

        let messages = service.list_for_display().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "More cats please");
        assert_eq!(messages[0].name, "");
        assert_eq!(messages[1].name, "Sam");
        assert!(messages.iter().all(|m| m.id.starts_with("f_")));
        assert_ne!(messages[0].id, messages[1].id);
    }

    #[tokio::test]
    async fn test_post_requires_text() {
        let service = setup_test().await;

        assert_eq!(
            service.post(request(Some("Sam"), "   ")).await,
            Err(DomainError::validation(MISSING_MESSAGE))
        );
        assert!(service.list_for_display().await.is_empty());
    }
}
