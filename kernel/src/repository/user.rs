use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::UserId,
    user::{event::CreateUser, User},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates the account, its role record and an initial profile.
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    /// None when the account has no role record (incomplete signup).
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
}
