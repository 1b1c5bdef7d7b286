use chrono::NaiveDate;
use kernel::model::{
    id::{SpaceId, UserId},
    space::{OwnedSpace, Space},
    user::SpaceOwner,
};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct SpaceRow {
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
    pub owner_id: UserId,
    pub owner_name: String,
}

impl From<SpaceRow> for Space {
    fn from(value: SpaceRow) -> Self {
        let SpaceRow {
            space_id,
            title,
            description,
            address,
            area_size,
            farm_type,
            available_from,
            available_to,
            amenities,
            rules,
            image_url,
            is_active,
            created_at,
            owner_id,
            owner_name,
        } = value;
        Space {
            space_id,
            title,
            description,
            address,
            area_size,
            farm_type,
            available_from,
            available_to,
            amenities,
            rules,
            image_url,
            is_active,
            created_at,
            owner: SpaceOwner {
                owner_id,
                owner_name,
            },
        }
    }
}

/// Dashboard row: the space plus its pending-request count.
#[derive(sqlx::FromRow)]
pub struct OwnedSpaceRow {
    #[sqlx(flatten)]
    pub space: SpaceRow,
    pub pending_requests: i64,
}

impl From<OwnedSpaceRow> for OwnedSpace {
    fn from(value: OwnedSpaceRow) -> Self {
        let OwnedSpaceRow {
            space,
            pending_requests,
        } = value;
        OwnedSpace {
            space: space.into(),
            pending_requests,
        }
    }
}
