use chrono::NaiveDate;

use crate::model::id::{SpaceId, UserId};

pub struct CreateSpace {
    pub owner_id: UserId,
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
}

#[derive(Debug)]
pub struct UpdateSpace {
    pub space_id: SpaceId,
    pub requested_user: UserId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub area_size: Option<String>,
    pub farm_type: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,
    pub amenities: Option<Vec<String>>,
    pub rules: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug)]
pub struct DeleteSpace {
    pub space_id: SpaceId,
    pub requested_user: UserId,
}
