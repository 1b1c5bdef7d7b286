use derive_new::new;

use crate::model::id::{RequestId, UserId};

#[derive(new)]
pub struct PostChatMessage {
    pub request_id: RequestId,
    pub sender_id: UserId,
    pub message: String,
}
