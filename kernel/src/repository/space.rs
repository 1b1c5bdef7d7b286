use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{SpaceId, UserId},
    space::{
        event::{CreateSpace, DeleteSpace, UpdateSpace},
        OwnedSpace, Space,
    },
};

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn create(&self, event: CreateSpace) -> AppResult<SpaceId>;
    /// Browsing list: active spaces only, newest first, optionally filtered
    /// by a title/address substring.
    async fn find_active(&self, query: Option<String>) -> AppResult<Vec<Space>>;
    /// Owner dashboard: all of the owner's spaces with pending-request counts.
    async fn find_by_owner(&self, owner_id: UserId) -> AppResult<Vec<OwnedSpace>>;
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>>;
    async fn update(&self, event: UpdateSpace) -> AppResult<()>;
    async fn delete(&self, event: DeleteSpace) -> AppResult<()>;
}
