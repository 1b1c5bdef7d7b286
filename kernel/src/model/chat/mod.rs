use chrono::{DateTime, Utc};

use crate::model::id::{MessageId, RequestId, UserId};

pub mod event;

/// Immutable once created; ordered by created_at ascending.
#[derive(Debug)]
pub struct ChatMessage {
    pub message_id: MessageId,
    pub request_id: RequestId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
