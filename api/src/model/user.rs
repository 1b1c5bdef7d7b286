use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    profile::{event::UpsertProfile, Profile},
    role::Role,
    user::{event::CreateUser, User},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Landowner,
    Gardener,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Landowner => Self::Landowner,
            Role::Gardener => Self::Gardener,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Landowner => Self::Landowner,
            RoleName::Gardener => Self::Gardener,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 8))]
    pub password: String,
    #[garde(skip)]
    pub role: RoleName,
}

impl From<SignupRequest> for CreateUser {
    fn from(value: SignupRequest) -> Self {
        let SignupRequest {
            name,
            email,
            password,
            role,
        } = value;
        Self {
            name,
            email,
            password,
            role: Role::from(role),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleName,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            name,
            email,
            role,
        } = value;
        Self {
            user_id,
            name,
            email,
            role: RoleName::from(role),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: UserId,
    pub name: String,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        let Profile {
            user_id,
            name,
            location,
            avatar_url,
            updated_at,
        } = value;
        Self {
            user_id,
            name,
            location,
            avatar_url,
            updated_at,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub location: Option<String>,
    #[garde(skip)]
    pub avatar_url: Option<String>,
}

#[derive(new)]
pub struct UpdateProfileRequestWithUserId(UserId, UpdateProfileRequest);

impl From<UpdateProfileRequestWithUserId> for UpsertProfile {
    fn from(value: UpdateProfileRequestWithUserId) -> Self {
        let UpdateProfileRequestWithUserId(
            user_id,
            UpdateProfileRequest {
                name,
                location,
                avatar_url,
            },
        ) = value;
        UpsertProfile {
            user_id,
            name,
            location,
            avatar_url,
        }
    }
}
