use chrono::{DateTime, NaiveDate, Utc};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, EnumString};

use crate::model::{
    id::{RequestId, SpaceId, UserId},
    user::RequestGardener,
};

pub mod event;

/// Lifecycle of a request for a space.
///
/// ```text
/// pending  --(owner approves)--> approved
/// pending  --(owner rejects)---> rejected      [terminal]
/// approved --(gardener starts)-> active
/// active   --(either completes)-> completed    [terminal]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Active,
    Completed,
}

impl RequestStatus {
    /// Whether `next` is one edge away from `self`. No edge skips a state,
    /// no edge reverses.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Active) | (Active, Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Rejected | RequestStatus::Completed)
    }

    /// Entry check used by token verification. Fail-closed: everything
    /// outside approved/active reads as invalid.
    pub fn grants_entry(self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DecisionOutcome {
    Approved,
    Rejected,
}

#[derive(Debug)]
pub struct SpaceRequest {
    pub request_id: RequestId,
    pub gardener: RequestGardener,
    pub message: Option<String>,
    pub status: RequestStatus,
    pub qr_code_token: String,
    pub started_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub space: RequestSpace,
}

#[derive(Debug)]
pub struct RequestSpace {
    pub space_id: SpaceId,
    pub title: String,
    pub address: String,
    pub owner_id: UserId,
    pub is_active: bool,
    pub available_to: Option<NaiveDate>,
}

impl SpaceRequest {
    pub fn is_party(&self, user_id: UserId) -> bool {
        self.gardener.gardener_id == user_id || self.space.owner_id == user_id
    }

    /// pending -> approved/rejected; only the space owner may decide.
    pub fn decide(&self, caller: UserId, outcome: DecisionOutcome) -> AppResult<RequestStatus> {
        if caller != self.space.owner_id {
            return Err(AppError::UnauthorizedOperation(
                "only the space owner can decide a request".into(),
            ));
        }
        let next = match outcome {
            DecisionOutcome::Approved => RequestStatus::Approved,
            DecisionOutcome::Rejected => RequestStatus::Rejected,
        };
        self.ensure_transition(next)
    }

    /// approved -> active; only the requesting gardener may start.
    pub fn start(&self, caller: UserId) -> AppResult<RequestStatus> {
        if caller != self.gardener.gardener_id {
            return Err(AppError::UnauthorizedOperation(
                "only the requesting gardener can start using the space".into(),
            ));
        }
        self.ensure_transition(RequestStatus::Active)
    }

    /// active -> completed; either party may end the use.
    pub fn complete(&self, caller: UserId) -> AppResult<RequestStatus> {
        if !self.is_party(caller) {
            return Err(AppError::UnauthorizedOperation(
                "only the request parties can complete it".into(),
            ));
        }
        self.ensure_transition(RequestStatus::Completed)
    }

    fn ensure_transition(&self, next: RequestStatus) -> AppResult<RequestStatus> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition(format!(
                "request {} cannot move from {} to {}",
                self.request_id,
                self.status.as_ref(),
                next.as_ref()
            )));
        }
        Ok(next)
    }
}

/// Outcome of presenting an access token at the gate.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenVerification {
    Valid {
        gardener_name: String,
        space_title: String,
        space_address: String,
    },
    Invalid,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn request(status: RequestStatus, gardener_id: UserId, owner_id: UserId) -> SpaceRequest {
        let now = Utc::now();
        SpaceRequest {
            request_id: RequestId::new(),
            gardener: RequestGardener {
                gardener_id,
                gardener_name: "Mali".into(),
            },
            message: Some("I would love to grow herbs here".into()),
            status,
            qr_code_token: "token".into(),
            started_at: None,
            created_at: now,
            updated_at: now,
            space: RequestSpace {
                space_id: SpaceId::new(),
                title: "Rooftop plot".into(),
                address: "12 Sukhumvit Rd".into(),
                owner_id,
                is_active: true,
                available_to: None,
            },
        }
    }

    #[rstest]
    #[case(RequestStatus::Pending, RequestStatus::Approved, true)]
    #[case(RequestStatus::Pending, RequestStatus::Rejected, true)]
    #[case(RequestStatus::Approved, RequestStatus::Active, true)]
    #[case(RequestStatus::Active, RequestStatus::Completed, true)]
    #[case(RequestStatus::Pending, RequestStatus::Active, false)]
    #[case(RequestStatus::Pending, RequestStatus::Completed, false)]
    #[case(RequestStatus::Approved, RequestStatus::Completed, false)]
    #[case(RequestStatus::Approved, RequestStatus::Rejected, false)]
    #[case(RequestStatus::Approved, RequestStatus::Pending, false)]
    #[case(RequestStatus::Active, RequestStatus::Approved, false)]
    #[case(RequestStatus::Rejected, RequestStatus::Approved, false)]
    #[case(RequestStatus::Rejected, RequestStatus::Active, false)]
    #[case(RequestStatus::Completed, RequestStatus::Active, false)]
    #[case(RequestStatus::Completed, RequestStatus::Pending, false)]
    fn transition_edges(
        #[case] from: RequestStatus,
        #[case] to: RequestStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn decide_requires_the_space_owner() {
        let gardener = UserId::new();
        let owner = UserId::new();
        let stranger = UserId::new();
        let req = request(RequestStatus::Pending, gardener, owner);

        let err = req.decide(stranger, DecisionOutcome::Approved).unwrap_err();
        assert!(matches!(err, AppError::UnauthorizedOperation(_)));

        // the gardener cannot approve their own request either
        let err = req.decide(gardener, DecisionOutcome::Approved).unwrap_err();
        assert!(matches!(err, AppError::UnauthorizedOperation(_)));

        assert_eq!(
            req.decide(owner, DecisionOutcome::Approved).unwrap(),
            RequestStatus::Approved
        );
        assert_eq!(
            req.decide(owner, DecisionOutcome::Rejected).unwrap(),
            RequestStatus::Rejected
        );
    }

    #[test]
    fn decide_requires_a_pending_request() {
        let gardener = UserId::new();
        let owner = UserId::new();
        for status in [
            RequestStatus::Approved,
            RequestStatus::Rejected,
            RequestStatus::Active,
            RequestStatus::Completed,
        ] {
            let req = request(status, gardener, owner);
            let err = req.decide(owner, DecisionOutcome::Approved).unwrap_err();
            assert!(matches!(err, AppError::InvalidTransition(_)));
        }
    }

    #[test]
    fn start_requires_the_gardener() {
        let gardener = UserId::new();
        let owner = UserId::new();
        let req = request(RequestStatus::Approved, gardener, owner);

        let err = req.start(owner).unwrap_err();
        assert!(matches!(err, AppError::UnauthorizedOperation(_)));

        assert_eq!(req.start(gardener).unwrap(), RequestStatus::Active);
    }

    #[test]
    fn start_requires_an_approved_request() {
        let gardener = UserId::new();
        let owner = UserId::new();
        let req = request(RequestStatus::Pending, gardener, owner);
        let err = req.start(gardener).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    #[test]
    fn complete_allows_either_party_and_only_active() {
        let gardener = UserId::new();
        let owner = UserId::new();

        let req = request(RequestStatus::Active, gardener, owner);
        assert_eq!(req.complete(gardener).unwrap(), RequestStatus::Completed);
        assert_eq!(req.complete(owner).unwrap(), RequestStatus::Completed);

        let err = req.complete(UserId::new()).unwrap_err();
        assert!(matches!(err, AppError::UnauthorizedOperation(_)));

        let done = request(RequestStatus::Completed, gardener, owner);
        let err = done.complete(gardener).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    #[rstest]
    #[case(RequestStatus::Pending, false)]
    #[case(RequestStatus::Approved, true)]
    #[case(RequestStatus::Rejected, false)]
    #[case(RequestStatus::Active, true)]
    #[case(RequestStatus::Completed, false)]
    fn entry_is_fail_closed(#[case] status: RequestStatus, #[case] granted: bool) {
        assert_eq!(status.grants_entry(), granted);
    }

    #[test]
    fn status_round_trips_through_strings() {
        use std::str::FromStr;
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
            RequestStatus::Active,
            RequestStatus::Completed,
        ] {
            assert_eq!(RequestStatus::from_str(status.as_ref()).unwrap(), status);
        }
    }
}
