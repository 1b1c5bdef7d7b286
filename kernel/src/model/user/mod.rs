use crate::model::{id::UserId, role::Role};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug)]
pub struct SpaceOwner {
    pub owner_id: UserId,
    pub owner_name: String,
}

#[derive(Debug)]
pub struct RequestGardener {
    pub gardener_id: UserId,
    pub gardener_name: String,
}
