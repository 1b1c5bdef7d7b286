use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::UserId,
    profile::{event::UpsertProfile, Profile},
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Profile>>;
    async fn upsert(&self, event: UpsertProfile) -> AppResult<()>;
}
