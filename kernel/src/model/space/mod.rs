use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{id::SpaceId, user::SpaceOwner};

pub mod event;

#[derive(Debug)]
pub struct Space {
    pub space_id: SpaceId,
    pub title: String,
    pub description: Option<String>,
    pub address: String,
    pub area_size: Option<String>,
    pub farm_type: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,
    pub amenities: Vec<String>,
    pub rules: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub owner: SpaceOwner,
}

/// A space as its owner sees it on the dashboard.
#[derive(Debug)]
pub struct OwnedSpace {
    pub space: Space,
    pub pending_requests: i64,
}
