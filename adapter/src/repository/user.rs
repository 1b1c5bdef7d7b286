use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::UserId,
        user::{event::CreateUser, User},
    },
    repository::user::UserRepository,
};
use shared::error::{AppError, AppResult};

use crate::{
    database::{model::user::UserRow, ConnectionPool},
    repository::auth::hash_password,
};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let password_hash = hash_password(&event.password)?;

        let mut tx = self.db.begin().await?;

        let res = sqlx::query(
            "INSERT INTO users (user_id, name, email, password_hash) VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(&event.name)
        .bind(&event.email)
        .bind(&password_hash)
        .execute(&mut *tx)
        .await;
        if let Err(e) = res {
            if e.as_database_error()
                .is_some_and(|de| de.is_unique_violation())
            {
                return Err(AppError::ResourceConflict(
                    "email is already registered".into(),
                ));
            }
            return Err(AppError::SpecificOperationError(e));
        }

        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(user_id)
            .bind(event.role.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        // the profile starts out as a copy of the signup name
        sqlx::query("INSERT INTO profiles (user_id, name) VALUES ($1, $2)")
            .bind(user_id)
            .bind(&event.name)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(User {
            user_id,
            name: event.name,
            email: event.email,
            role: event.role,
        })
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT
                u.user_id,
                u.name,
                u.email,
                ur.role
                FROM users AS u
                INNER JOIN user_roles AS ur ON u.user_id = ur.user_id
                WHERE u.user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        row.map(User::try_from).transpose()
    }
}
