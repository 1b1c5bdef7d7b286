use axum::Router;
use registry::AppRegistry;

use super::{
    auth::build_auth_routers, health::build_health_check_routers,
    request::build_request_routers, space::build_space_routers, user::build_user_routers,
};

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_user_routers())
        .merge(build_space_routers())
        .merge(build_request_routers());
    Router::new().nest("/api/v1", router)
}
