use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::{RequestId, SpaceId},
    request::event::{CompleteRequest, StartRequest},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::request::{
        CreateRequestRequest, CreateRequestRequestWithIds, CredentialResponse,
        DecideRequestRequest, DecideRequestRequestWithIds, RequestListResponse, RequestResponse,
        VerificationResponse, VerifyQuery,
    },
};

pub async fn request_space(
    user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRequestRequest>,
) -> AppResult<(StatusCode, Json<RequestResponse>)> {
    if !user.is_gardener() {
        return Err(AppError::ForbiddenOperation(
            "only gardeners can request a space".into(),
        ));
    }
    req.validate(&())?;

    let create_request = CreateRequestRequestWithIds::new(space_id, user.id(), req);
    registry
        .request_repository()
        .create(create_request.into())
        .await
        .map(|request| (StatusCode::CREATED, Json(request.into())))
}

pub async fn decide_request(
    user: AuthorizedUser,
    Path(request_id): Path<RequestId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<DecideRequestRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let decide = DecideRequestRequestWithIds::new(request_id, user.id(), req);
    registry
        .request_repository()
        .decide(decide.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn start_request(
    user: AuthorizedUser,
    Path(request_id): Path<RequestId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .request_repository()
        .start(StartRequest::new(request_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn complete_request(
    user: AuthorizedUser,
    Path(request_id): Path<RequestId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .request_repository()
        .complete(CompleteRequest::new(request_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_my_requests(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RequestListResponse>> {
    registry
        .request_repository()
        .find_by_gardener(user.id())
        .await
        .map(RequestListResponse::from)
        .map(Json)
}

pub async fn show_received_requests(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RequestListResponse>> {
    registry
        .request_repository()
        .find_received_by_owner(user.id())
        .await
        .map(RequestListResponse::from)
        .map(Json)
}

pub async fn show_request(
    user: AuthorizedUser,
    Path(request_id): Path<RequestId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RequestResponse>> {
    let request = registry
        .request_repository()
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("request was not found".into()))?;
    if !request.is_party(user.id()) {
        return Err(AppError::ForbiddenOperation(
            "only the request parties can view it".into(),
        ));
    }
    Ok(Json(request.into()))
}

pub async fn show_credential(
    user: AuthorizedUser,
    Path(request_id): Path<RequestId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CredentialResponse>> {
    let request = registry
        .request_repository()
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("request was not found".into()))?;
    if request.gardener.gardener_id != user.id() {
        return Err(AppError::ForbiddenOperation(
            "only the requesting gardener holds the access credential".into(),
        ));
    }
    Ok(Json(request.into()))
}

/// Gate-side check. Unauthenticated: whoever scans the code gets a plain
/// valid/invalid answer and nothing else.
pub async fn verify_access_token(
    Query(query): Query<VerifyQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<VerificationResponse>> {
    registry
        .request_repository()
        .verify_token(&query.token)
        .await
        .map(VerificationResponse::from)
        .map(Json)
}
