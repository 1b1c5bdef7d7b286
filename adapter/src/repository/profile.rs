use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::UserId,
        profile::{event::UpsertProfile, Profile},
    },
    repository::profile::ProfileRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::user::ProfileRow, ConnectionPool};

#[derive(new)]
pub struct ProfileRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ProfileRepository for ProfileRepositoryImpl {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Profile>> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
                SELECT user_id, name, location, avatar_url, updated_at
                FROM profiles
                WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(row.map(Profile::from))
    }

    async fn upsert(&self, event: UpsertProfile) -> AppResult<()> {
        sqlx::query(
            r#"
                INSERT INTO profiles (user_id, name, location, avatar_url)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id) DO UPDATE SET
                    name = EXCLUDED.name,
                    location = EXCLUDED.location,
                    avatar_url = EXCLUDED.avatar_url,
                    updated_at = NOW()
            "#,
        )
        .bind(event.user_id)
        .bind(&event.name)
        .bind(&event.location)
        .bind(&event.avatar_url)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
