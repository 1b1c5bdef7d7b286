use std::str::FromStr;

use kernel::model::{
    id::UserId,
    profile::Profile,
    role::Role,
    user::User,
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            name,
            email,
            role,
        } = value;
        let role = Role::from_str(&role)
            .map_err(|_| AppError::ConversionEntityError(format!("unknown role: {role}")))?;
        Ok(User {
            user_id,
            name,
            email,
            role,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct ProfileRow {
    pub user_id: UserId,
    pub name: String,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(value: ProfileRow) -> Self {
        let ProfileRow {
            user_id,
            name,
            location,
            avatar_url,
            updated_at,
        } = value;
        Profile {
            user_id,
            name,
            location,
            avatar_url,
            updated_at,
        }
    }
}
