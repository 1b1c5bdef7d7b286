use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    chat::{event::PostChatMessage, ChatMessage},
    id::{MessageId, RequestId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    #[garde(length(min = 1))]
    pub message: String,
}

#[derive(new)]
pub struct PostMessageRequestWithIds(RequestId, UserId, PostMessageRequest);

impl From<PostMessageRequestWithIds> for PostChatMessage {
    fn from(value: PostMessageRequestWithIds) -> Self {
        let PostMessageRequestWithIds(request_id, sender_id, PostMessageRequest { message }) =
            value;
        PostChatMessage {
            request_id,
            sender_id,
            message,
        }
    }
}

#[derive(Deserialize)]
pub struct MessageListQuery {
    /// Only messages strictly newer than this instant are returned.
    pub since: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message_id: MessageId,
    pub request_id: RequestId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for MessageResponse {
    fn from(value: ChatMessage) -> Self {
        let ChatMessage {
            message_id,
            request_id,
            sender_id,
            sender_name,
            message,
            created_at,
        } = value;
        Self {
            message_id,
            request_id,
            sender_id,
            sender_name,
            message,
            created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageListResponse {
    pub items: Vec<MessageResponse>,
}

impl From<Vec<ChatMessage>> for MessageListResponse {
    fn from(value: Vec<ChatMessage>) -> Self {
        Self {
            items: value.into_iter().map(MessageResponse::from).collect(),
        }
    }
}
