use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

use crate::model::{
    chat::{event::PostChatMessage, ChatMessage},
    id::RequestId,
};

#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    async fn post(&self, event: PostChatMessage) -> AppResult<ChatMessage>;
    /// Messages for a request ordered by created_at ascending. `since`
    /// narrows to rows strictly newer than the given instant, which lets
    /// clients poll with their last seen timestamp.
    async fn find_by_request_id(
        &self,
        request_id: RequestId,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<ChatMessage>>;
}
