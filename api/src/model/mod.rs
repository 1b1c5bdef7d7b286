pub mod auth;
pub mod chat;
pub mod request;
pub mod space;
pub mod user;
