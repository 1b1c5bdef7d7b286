use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    redis::RedisClient,
    repository::{
        auth::AuthRepositoryImpl, chat::ChatMessageRepositoryImpl,
        health::HealthCheckRepositoryImpl, profile::ProfileRepositoryImpl,
        request::RequestRepositoryImpl, space::SpaceRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::repository::{
    auth::AuthRepository, chat::ChatMessageRepository, health::HealthCheckRepository,
    profile::ProfileRepository, request::RequestRepository, space::SpaceRepository,
    user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    user_repository: Arc<dyn UserRepository>,
    profile_repository: Arc<dyn ProfileRepository>,
    space_repository: Arc<dyn SpaceRepository>,
    request_repository: Arc<dyn RequestRepository>,
    chat_message_repository: Arc<dyn ChatMessageRepository>,
    auth_repository: Arc<dyn AuthRepository>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        app_config: AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let profile_repository = Arc::new(ProfileRepositoryImpl::new(pool.clone()));
        let space_repository = Arc::new(SpaceRepositoryImpl::new(pool.clone()));
        let request_repository = Arc::new(RequestRepositoryImpl::new(pool.clone()));
        let chat_message_repository = Arc::new(ChatMessageRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        Self {
            health_check_repository,
            user_repository,
            profile_repository,
            space_repository,
            request_repository,
            chat_message_repository,
            auth_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn profile_repository(&self) -> Arc<dyn ProfileRepository> {
        self.profile_repository.clone()
    }

    pub fn space_repository(&self) -> Arc<dyn SpaceRepository> {
        self.space_repository.clone()
    }

    pub fn request_repository(&self) -> Arc<dyn RequestRepository> {
        self.request_repository.clone()
    }

    pub fn chat_message_repository(&self) -> Arc<dyn ChatMessageRepository> {
        self.chat_message_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }
}
