use std::str::FromStr;

use chrono::NaiveDate;
use kernel::model::{
    id::{RequestId, SpaceId, UserId},
    request::{RequestSpace, RequestStatus, SpaceRequest},
    user::RequestGardener,
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct SpaceRequestRow {
    pub request_id: RequestId,
    pub gardener_id: UserId,
    pub gardener_name: String,
    pub message: Option<String>,
    pub status: String,
    pub qr_code_token: String,
    pub started_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub space_id: SpaceId,
    pub title: String,
    pub address: String,
    pub owner_id: UserId,
    pub is_active: bool,
    pub available_to: Option<NaiveDate>,
}

impl TryFrom<SpaceRequestRow> for SpaceRequest {
    type Error = AppError;

    fn try_from(value: SpaceRequestRow) -> Result<Self, Self::Error> {
        let SpaceRequestRow {
            request_id,
            gardener_id,
            gardener_name,
            message,
            status,
            qr_code_token,
            started_at,
            created_at,
            updated_at,
            space_id,
            title,
            address,
            owner_id,
            is_active,
            available_to,
        } = value;
        let status = RequestStatus::from_str(&status).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown request status: {status}"))
        })?;
        Ok(SpaceRequest {
            request_id,
            gardener: RequestGardener {
                gardener_id,
                gardener_name,
            },
            message,
            status,
            qr_code_token,
            started_at,
            created_at,
            updated_at,
            space: RequestSpace {
                space_id,
                title,
                address,
                owner_id,
                is_active,
                available_to,
            },
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct TokenVerificationRow {
    pub status: String,
    pub gardener_name: String,
    pub title: String,
    pub address: String,
}
