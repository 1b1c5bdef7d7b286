use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{RequestId, SpaceId, UserId},
    request::{
        event::{CreateRequest, DecideRequest},
        DecisionOutcome, RequestStatus, SpaceRequest, TokenVerification,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatusName {
    Pending,
    Approved,
    Rejected,
    Active,
    Completed,
}

impl From<RequestStatus> for RequestStatusName {
    fn from(value: RequestStatus) -> Self {
        match value {
            RequestStatus::Pending => Self::Pending,
            RequestStatus::Approved => Self::Approved,
            RequestStatus::Rejected => Self::Rejected,
            RequestStatus::Active => Self::Active,
            RequestStatus::Completed => Self::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionOutcomeName {
    Approved,
    Rejected,
}

impl From<DecisionOutcomeName> for DecisionOutcome {
    fn from(value: DecisionOutcomeName) -> Self {
        match value {
            DecisionOutcomeName::Approved => Self::Approved,
            DecisionOutcomeName::Rejected => Self::Rejected,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestRequest {
    #[garde(skip)]
    pub message: Option<String>,
}

#[derive(new)]
pub struct CreateRequestRequestWithIds(SpaceId, UserId, CreateRequestRequest);

impl From<CreateRequestRequestWithIds> for CreateRequest {
    fn from(value: CreateRequestRequestWithIds) -> Self {
        let CreateRequestRequestWithIds(space_id, gardener_id, CreateRequestRequest { message }) =
            value;
        CreateRequest {
            space_id,
            gardener_id,
            message,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DecideRequestRequest {
    #[garde(skip)]
    pub outcome: DecisionOutcomeName,
}

#[derive(new)]
pub struct DecideRequestRequestWithIds(RequestId, UserId, DecideRequestRequest);

impl From<DecideRequestRequestWithIds> for DecideRequest {
    fn from(value: DecideRequestRequestWithIds) -> Self {
        let DecideRequestRequestWithIds(request_id, requested_user, DecideRequestRequest { outcome }) =
            value;
        DecideRequest {
            request_id,
            requested_user,
            outcome: DecisionOutcome::from(outcome),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpaceResponse {
    pub space_id: SpaceId,
    pub title: String,
    pub address: String,
    pub owner_id: UserId,
    pub is_active: bool,
    pub available_to: Option<NaiveDate>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub request_id: RequestId,
    pub gardener_id: UserId,
    pub gardener_name: String,
    pub message: Option<String>,
    pub status: RequestStatusName,
    pub started_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub space: RequestSpaceResponse,
}

impl From<SpaceRequest> for RequestResponse {
    fn from(value: SpaceRequest) -> Self {
        let SpaceRequest {
            request_id,
            gardener,
            message,
            status,
            qr_code_token: _,
            started_at,
            created_at,
            updated_at,
            space,
        } = value;
        Self {
            request_id,
            gardener_id: gardener.gardener_id,
            gardener_name: gardener.gardener_name,
            message,
            status: RequestStatusName::from(status),
            started_at,
            created_at,
            updated_at,
            space: RequestSpaceResponse {
                space_id: space.space_id,
                title: space.title,
                address: space.address,
                owner_id: space.owner_id,
                is_active: space.is_active,
                available_to: space.available_to,
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListResponse {
    pub items: Vec<RequestResponse>,
}

impl From<Vec<SpaceRequest>> for RequestListResponse {
    fn from(value: Vec<SpaceRequest>) -> Self {
        Self {
            items: value.into_iter().map(RequestResponse::from).collect(),
        }
    }
}

/// The token is only ever exposed here, to the requesting gardener.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialResponse {
    pub request_id: RequestId,
    pub qr_code_token: String,
    pub status: RequestStatusName,
}

impl From<SpaceRequest> for CredentialResponse {
    fn from(value: SpaceRequest) -> Self {
        Self {
            request_id: value.request_id,
            qr_code_token: value.qr_code_token,
            status: RequestStatusName::from(value.status),
        }
    }
}

#[derive(Deserialize)]
pub struct VerifyQuery {
    pub token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gardener_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_address: Option<String>,
}

impl From<TokenVerification> for VerificationResponse {
    fn from(value: TokenVerification) -> Self {
        match value {
            TokenVerification::Valid {
                gardener_name,
                space_title,
                space_address,
            } => Self {
                valid: true,
                gardener_name: Some(gardener_name),
                space_title: Some(space_title),
                space_address: Some(space_address),
            },
            TokenVerification::Invalid => Self {
                valid: false,
                gardener_name: None,
                space_title: None,
                space_address: None,
            },
        }
    }
}
