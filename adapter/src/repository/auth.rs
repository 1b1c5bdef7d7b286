use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        auth::{event::CreateToken, AccessToken},
        id::UserId,
    },
    repository::auth::AuthRepository,
};
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::{
    database::ConnectionPool, redis::RedisClient, repository::generate_opaque_token,
};

pub(crate) fn hash_password(raw: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|hashed| hashed.to_string())
        .map_err(|e| AppError::PasswordHashError(e.to_string()))
}

fn verify_password(raw: &str, hashed: &str) -> AppResult<()> {
    let parsed =
        PasswordHash::new(hashed).map_err(|e| AppError::PasswordHashError(e.to_string()))?;
    Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .map_err(|_| AppError::UnauthenticatedError)
}

fn auth_key(token: &AccessToken) -> String {
    format!("auth:{}", token.0)
}

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let Some(value) = self.kv.get(&auth_key(access_token)).await? else {
            return Ok(None);
        };
        let user_id = value
            .parse::<Uuid>()
            .map_err(|_| AppError::ConversionEntityError("corrupt session record".into()))?;
        Ok(Some(UserId::from(user_id)))
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let row: Option<(UserId, String)> =
            sqlx::query_as("SELECT user_id, password_hash FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some((user_id, password_hash)) = row else {
            return Err(AppError::UnauthenticatedError);
        };
        verify_password(password, &password_hash)?;
        Ok(user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let token = AccessToken(generate_opaque_token());
        self.kv
            .set_ex(&auth_key(&token), &event.user_id.to_string(), self.ttl)
            .await?;
        Ok(token)
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        self.kv.delete(&auth_key(&access_token)).await
    }
}
