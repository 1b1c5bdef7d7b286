use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::SpaceId, space::event::DeleteSpace};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::space::{
        CreateSpaceRequest, CreateSpaceRequestWithOwnerId, OwnedSpaceListResponse,
        SpaceCreatedResponse, SpaceListQuery, SpaceListResponse, SpaceResponse,
        UpdateSpaceRequest, UpdateSpaceRequestWithIds,
    },
};

pub async fn register_space(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateSpaceRequest>,
) -> AppResult<(StatusCode, Json<SpaceCreatedResponse>)> {
    if !user.is_landowner() {
        return Err(AppError::ForbiddenOperation(
            "only landowners can list a space".into(),
        ));
    }
    req.validate(&())?;

    let create_space = CreateSpaceRequestWithOwnerId::new(user.id(), req);
    registry
        .space_repository()
        .create(create_space.into())
        .await
        .map(|space_id| (StatusCode::CREATED, Json(SpaceCreatedResponse { space_id })))
}

pub async fn show_space_list(
    _user: AuthorizedUser,
    Query(query): Query<SpaceListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SpaceListResponse>> {
    query.validate(&())?;

    registry
        .space_repository()
        .find_active(query.q)
        .await
        .map(SpaceListResponse::from)
        .map(Json)
}

pub async fn show_my_spaces(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<OwnedSpaceListResponse>> {
    registry
        .space_repository()
        .find_by_owner(user.id())
        .await
        .map(OwnedSpaceListResponse::from)
        .map(Json)
}

pub async fn show_space(
    _user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SpaceResponse>> {
    registry
        .space_repository()
        .find_by_id(space_id)
        .await
        .and_then(|space| match space {
            Some(s) => Ok(Json(s.into())),
            None => Err(AppError::EntityNotFound("space was not found".into())),
        })
}

pub async fn update_space(
    user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateSpaceRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_space = UpdateSpaceRequestWithIds::new(space_id, user.id(), req);
    registry
        .space_repository()
        .update(update_space.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_space(
    user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete_space = DeleteSpace {
        space_id,
        requested_user: user.id(),
    };
    registry
        .space_repository()
        .delete(delete_space)
        .await
        .map(|_| StatusCode::OK)
}
