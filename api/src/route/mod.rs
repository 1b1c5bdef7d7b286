pub mod auth;
pub mod health;
pub mod request;
pub mod space;
pub mod user;
pub mod v1;
