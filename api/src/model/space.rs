use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{SpaceId, UserId},
    space::{
        event::{CreateSpace, UpdateSpace},
        OwnedSpace, Space,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpaceListQuery {
    /// Substring matched against title and address.
    #[garde(skip)]
    pub q: Option<String>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceRequest {
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(length(min = 1))]
    pub address: String,
    #[garde(skip)]
    pub area_size: Option<String>,
    #[garde(skip)]
    pub farm_type: Option<String>,
    #[garde(skip)]
    pub available_from: Option<NaiveDate>,
    #[garde(skip)]
    pub available_to: Option<NaiveDate>,
    #[garde(skip)]
    #[serde(default)]
    pub amenities: Vec<String>,
    #[garde(skip)]
    pub rules: Option<String>,
    #[garde(skip)]
    pub image_url: Option<String>,
}

#[derive(new)]
pub struct CreateSpaceRequestWithOwnerId(UserId, CreateSpaceRequest);

impl From<CreateSpaceRequestWithOwnerId> for CreateSpace {
    fn from(value: CreateSpaceRequestWithOwnerId) -> Self {
        let CreateSpaceRequestWithOwnerId(
            owner_id,
            CreateSpaceRequest {
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
            },
        ) = value;
        CreateSpace {
            owner_id,
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
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceRequest {
    #[garde(inner(length(min = 1)))]
    pub title: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(length(min = 1)))]
    pub address: Option<String>,
    #[garde(skip)]
    pub area_size: Option<String>,
    #[garde(skip)]
    pub farm_type: Option<String>,
    #[garde(skip)]
    pub available_from: Option<NaiveDate>,
    #[garde(skip)]
    pub available_to: Option<NaiveDate>,
    #[garde(skip)]
    pub amenities: Option<Vec<String>>,
    #[garde(skip)]
    pub rules: Option<String>,
    #[garde(skip)]
    pub image_url: Option<String>,
    #[garde(skip)]
    pub is_active: Option<bool>,
}

#[derive(new)]
pub struct UpdateSpaceRequestWithIds(SpaceId, UserId, UpdateSpaceRequest);

impl From<UpdateSpaceRequestWithIds> for UpdateSpace {
    fn from(value: UpdateSpaceRequestWithIds) -> Self {
        let UpdateSpaceRequestWithIds(
            space_id,
            requested_user,
            UpdateSpaceRequest {
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
            },
        ) = value;
        UpdateSpace {
            space_id,
            requested_user,
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
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceOwnerResponse {
    pub owner_id: UserId,
    pub owner_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceResponse {
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
    pub owner: SpaceOwnerResponse,
}

impl From<Space> for SpaceResponse {
    fn from(value: Space) -> Self {
        let Space {
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
            owner,
        } = value;
        Self {
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
            owner: SpaceOwnerResponse {
                owner_id: owner.owner_id,
                owner_name: owner.owner_name,
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceListResponse {
    pub items: Vec<SpaceResponse>,
}

impl From<Vec<Space>> for SpaceListResponse {
    fn from(value: Vec<Space>) -> Self {
        Self {
            items: value.into_iter().map(SpaceResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedSpaceResponse {
    #[serde(flatten)]
    pub space: SpaceResponse,
    pub pending_requests: i64,
}

impl From<OwnedSpace> for OwnedSpaceResponse {
    fn from(value: OwnedSpace) -> Self {
        let OwnedSpace {
            space,
            pending_requests,
        } = value;
        Self {
            space: space.into(),
            pending_requests,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedSpaceListResponse {
    pub items: Vec<OwnedSpaceResponse>,
}

impl From<Vec<OwnedSpace>> for OwnedSpaceListResponse {
    fn from(value: Vec<OwnedSpace>) -> Self {
        Self {
            items: value.into_iter().map(OwnedSpaceResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceCreatedResponse {
    pub space_id: SpaceId,
}
