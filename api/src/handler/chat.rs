use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::RequestId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::chat::{
        MessageListQuery, MessageListResponse, MessageResponse, PostMessageRequest,
        PostMessageRequestWithIds,
    },
};

async fn ensure_party(
    registry: &AppRegistry,
    request_id: RequestId,
    user: &AuthorizedUser,
) -> AppResult<()> {
    let request = registry
        .request_repository()
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("request was not found".into()))?;
    if !request.is_party(user.id()) {
        return Err(AppError::ForbiddenOperation(
            "only the request parties can chat".into(),
        ));
    }
    Ok(())
}

pub async fn post_message(
    user: AuthorizedUser,
    Path(request_id): Path<RequestId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<PostMessageRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    req.validate(&())?;
    ensure_party(&registry, request_id, &user).await?;

    let post = PostMessageRequestWithIds::new(request_id, user.id(), req);
    registry
        .chat_message_repository()
        .post(post.into())
        .await
        .map(|message| (StatusCode::CREATED, Json(message.into())))
}

pub async fn show_messages(
    user: AuthorizedUser,
    Path(request_id): Path<RequestId>,
    Query(query): Query<MessageListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageListResponse>> {
    ensure_party(&registry, request_id, &user).await?;

    registry
        .chat_message_repository()
        .find_by_request_id(request_id, query.since)
        .await
        .map(MessageListResponse::from)
        .map(Json)
}
