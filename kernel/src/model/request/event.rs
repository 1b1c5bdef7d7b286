use derive_new::new;

use super::DecisionOutcome;
use crate::model::id::{RequestId, SpaceId, UserId};

#[derive(new)]
pub struct CreateRequest {
    pub space_id: SpaceId,
    pub gardener_id: UserId,
    pub message: Option<String>,
}

#[derive(new)]
pub struct DecideRequest {
    pub request_id: RequestId,
    pub requested_user: UserId,
    pub outcome: DecisionOutcome,
}

#[derive(new)]
pub struct StartRequest {
    pub request_id: RequestId,
    pub requested_user: UserId,
}

#[derive(new)]
pub struct CompleteRequest {
    pub request_id: RequestId,
    pub requested_user: UserId,
}
