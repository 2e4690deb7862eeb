use shared::FeedbackMessage;
use tokio::sync::Mutex;
use tracing::info;

use crate::storage::codec::StorageCodec;
use super::unique_id;

/// Append-only list of community feedback messages
pub struct FeedbackRepository {
    codec: StorageCodec,
    messages: Mutex<Vec<FeedbackMessage>>,
}

impl FeedbackRepository {
    pub async fn load(codec: StorageCodec) -> Self {
        let messages = codec.load_feedback().await;
        info!("Loaded {} feedback messages", messages.len());

        Self {
            codec,
            messages: Mutex::new(messages),
        }
    }

    /// Messages in the order they were posted
    pub async fn list(&self) -> Vec<FeedbackMessage> {
        self.messages.lock().await.clone()
    }

    /// Append a message under a fresh ID derived from `epoch_millis`
    pub async fn append(&self, mut message: FeedbackMessage, epoch_millis: u64) -> FeedbackMessage {
        let mut messages = self.messages.lock().await;

        message.id = unique_id(FeedbackMessage::generate_id(epoch_millis), |id| {
            messages.iter().any(|m| m.id == id)
        });
        messages.push(message.clone());
        self.codec.save_feedback(&messages).await;
        message
    }
}
