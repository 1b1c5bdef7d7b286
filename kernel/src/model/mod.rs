pub mod auth;
pub mod chat;
pub mod id;
pub mod profile;
pub mod request;
pub mod role;
pub mod space;
pub mod user;
