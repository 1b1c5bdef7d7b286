pub mod auth;
pub mod chat;
pub mod health;
pub mod profile;
pub mod request;
pub mod space;
pub mod user;
