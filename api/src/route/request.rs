use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    chat::{post_message, show_messages},
    request::{
        complete_request, decide_request, show_credential, show_my_requests,
        show_received_requests, show_request, start_request, verify_access_token,
    },
};

pub fn build_request_routers() -> Router<AppRegistry> {
    let request_routers = Router::new()
        .route("/mine", get(show_my_requests))
        .route("/received", get(show_received_requests))
        .route("/:request_id", get(show_request))
        .route("/:request_id/decision", put(decide_request))
        .route("/:request_id/start", put(start_request))
        .route("/:request_id/complete", put(complete_request))
        .route("/:request_id/credential", get(show_credential))
        .route("/:request_id/messages", get(show_messages))
        .route("/:request_id/messages", post(post_message));

    Router::new()
        .nest("/requests", request_routers)
        .route("/verify", get(verify_access_token))
}
