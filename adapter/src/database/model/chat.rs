use kernel::model::{
    chat::ChatMessage,
    id::{MessageId, RequestId, UserId},
};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct ChatMessageRow {
    pub message_id: MessageId,
    pub request_id: RequestId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessageRow> for ChatMessage {
    fn from(value: ChatMessageRow) -> Self {
        let ChatMessageRow {
            message_id,
            request_id,
            sender_id,
            sender_name,
            message,
            created_at,
        } = value;
        ChatMessage {
            message_id,
            request_id,
            sender_id,
            sender_name,
            message,
            created_at,
        }
    }
}
