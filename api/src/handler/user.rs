use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::user::{
        ProfileResponse, UpdateProfileRequest, UpdateProfileRequestWithUserId, UserResponse,
    },
};

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn get_profile(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ProfileResponse>> {
    registry
        .profile_repository()
        .find_by_user_id(user.id())
        .await
        .and_then(|profile| match profile {
            Some(p) => Ok(Json(p.into())),
            None => Err(AppError::EntityNotFound("profile was not found".into())),
        })
}

pub async fn update_profile(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let upsert = UpdateProfileRequestWithUserId::new(user.id(), req);
    registry
        .profile_repository()
        .upsert(upsert.into())
        .await
        .map(|_| StatusCode::OK)
}
