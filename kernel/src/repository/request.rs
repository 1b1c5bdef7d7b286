use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{RequestId, UserId},
    request::{
        event::{CompleteRequest, CreateRequest, DecideRequest, StartRequest},
        SpaceRequest, TokenVerification,
    },
};

#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Inserts a pending request with a fresh access token. Fails when the
    /// space is missing/inactive, when the gardener already has a request
    /// for the space, or when another gardener actively occupies it.
    async fn create(&self, event: CreateRequest) -> AppResult<SpaceRequest>;
    /// pending -> approved/rejected by the space owner.
    async fn decide(&self, event: DecideRequest) -> AppResult<()>;
    /// approved -> active by the requesting gardener; records started_at.
    async fn start(&self, event: StartRequest) -> AppResult<()>;
    /// active -> completed by either party; frees the space.
    async fn complete(&self, event: CompleteRequest) -> AppResult<()>;
    async fn find_by_id(&self, request_id: RequestId) -> AppResult<Option<SpaceRequest>>;
    async fn find_by_gardener(&self, gardener_id: UserId) -> AppResult<Vec<SpaceRequest>>;
    async fn find_received_by_owner(&self, owner_id: UserId) -> AppResult<Vec<SpaceRequest>>;
    /// Looks up the request bearing the token and reports whether it
    /// currently grants entry. Unknown tokens and non-entry statuses are
    /// indistinguishable to the caller.
    async fn verify_token(&self, token: &str) -> AppResult<TokenVerification>;
}
