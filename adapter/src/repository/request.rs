use std::str::FromStr;

use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{RequestId, SpaceId, UserId},
        request::{
            event::{CompleteRequest, CreateRequest, DecideRequest, StartRequest},
            DecisionOutcome, RequestStatus, SpaceRequest, TokenVerification,
        },
    },
    repository::request::RequestRepository,
};
use shared::error::{AppError, AppResult};

use crate::{
    database::{
        model::request::{SpaceRequestRow, TokenVerificationRow},
        ConnectionPool,
    },
    repository::generate_opaque_token,
};

const SELECT_REQUEST: &str = r#"
    SELECT
    r.request_id,
    r.gardener_id,
    gp.name AS gardener_name,
    r.message,
    r.status,
    r.qr_code_token,
    r.started_at,
    r.created_at,
    r.updated_at,
    s.space_id,
    s.title,
    s.address,
    s.owner_id,
    s.is_active,
    s.available_to
    FROM space_requests AS r
    INNER JOIN urban_farm_spaces AS s ON r.space_id = s.space_id
    INNER JOIN profiles AS gp ON r.gardener_id = gp.user_id
"#;

#[derive(new)]
pub struct RequestRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RequestRepository for RequestRepositoryImpl {
    async fn create(&self, event: CreateRequest) -> AppResult<SpaceRequest> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let space: Option<(UserId, bool)> =
            sqlx::query_as("SELECT owner_id, is_active FROM urban_farm_spaces WHERE space_id = $1")
                .bind(event.space_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        match space {
            None => {
                return Err(AppError::EntityNotFound(format!(
                    "space {} was not found",
                    event.space_id
                )))
            }
            Some((_, false)) => {
                return Err(AppError::EntityNotFound(format!(
                    "space {} is not accepting requests",
                    event.space_id
                )))
            }
            Some((owner_id, _)) if owner_id == event.gardener_id => {
                return Err(AppError::ForbiddenOperation(
                    "owners cannot request their own space".into(),
                ))
            }
            Some(_) => {}
        }

        let duplicate: Option<(RequestId,)> = sqlx::query_as(
            "SELECT request_id FROM space_requests WHERE space_id = $1 AND gardener_id = $2",
        )
        .bind(event.space_id)
        .bind(event.gardener_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if duplicate.is_some() {
            return Err(AppError::ResourceConflict(
                "you have already requested this space".into(),
            ));
        }

        self.ensure_unoccupied(&mut tx, event.space_id).await?;

        let request_id = RequestId::new();
        let token = generate_opaque_token();
        let res = sqlx::query(
            r#"
                INSERT INTO space_requests
                (request_id, space_id, gardener_id, message, qr_code_token)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(request_id)
        .bind(event.space_id)
        .bind(event.gardener_id)
        .bind(&event.message)
        .bind(&token)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no request record has been created".into(),
            ));
        }

        let request = self.fetch_in_tx(&mut tx, request_id).await?;
        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(request)
    }

    async fn decide(&self, event: DecideRequest) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let request = self.fetch_in_tx(&mut tx, event.request_id).await?;
        let next = request.decide(event.requested_user, event.outcome)?;

        // approving must not put two gardeners on the same plot
        if matches!(event.outcome, DecisionOutcome::Approved) {
            self.ensure_unoccupied(&mut tx, request.space.space_id)
                .await?;
        }

        self.transition(&mut tx, &request, next).await?;
        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn start(&self, event: StartRequest) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let request = self.fetch_in_tx(&mut tx, event.request_id).await?;
        let next = request.start(event.requested_user)?;

        let res = sqlx::query(
            r#"
                UPDATE space_requests
                SET status = $1, started_at = NOW()
                WHERE request_id = $2 AND status = $3
            "#,
        )
        .bind(next.as_ref())
        .bind(request.request_id)
        .bind(request.status.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::InvalidTransition(format!(
                "request {} changed state concurrently",
                request.request_id
            )));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn complete(&self, event: CompleteRequest) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let request = self.fetch_in_tx(&mut tx, event.request_id).await?;
        let next = request.complete(event.requested_user)?;

        self.transition(&mut tx, &request, next).await?;
        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn find_by_id(&self, request_id: RequestId) -> AppResult<Option<SpaceRequest>> {
        let sql = format!("{SELECT_REQUEST} WHERE r.request_id = $1");
        let row: Option<SpaceRequestRow> = sqlx::query_as(&sql)
            .bind(request_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        row.map(SpaceRequest::try_from).transpose()
    }

    async fn find_by_gardener(&self, gardener_id: UserId) -> AppResult<Vec<SpaceRequest>> {
        let sql = format!("{SELECT_REQUEST} WHERE r.gardener_id = $1 ORDER BY r.created_at DESC");
        let rows: Vec<SpaceRequestRow> = sqlx::query_as(&sql)
            .bind(gardener_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(SpaceRequest::try_from).collect()
    }

    async fn find_received_by_owner(&self, owner_id: UserId) -> AppResult<Vec<SpaceRequest>> {
        let sql = format!("{SELECT_REQUEST} WHERE s.owner_id = $1 ORDER BY r.created_at DESC");
        let rows: Vec<SpaceRequestRow> = sqlx::query_as(&sql)
            .bind(owner_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(SpaceRequest::try_from).collect()
    }

    async fn verify_token(&self, token: &str) -> AppResult<TokenVerification> {
        let row: Option<TokenVerificationRow> = sqlx::query_as(
            r#"
                SELECT
                r.status,
                gp.name AS gardener_name,
                s.title,
                s.address
                FROM space_requests AS r
                INNER JOIN urban_farm_spaces AS s ON r.space_id = s.space_id
                INNER JOIN profiles AS gp ON r.gardener_id = gp.user_id
                WHERE r.qr_code_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Ok(TokenVerification::Invalid);
        };
        let status = RequestStatus::from_str(&row.status).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown request status: {}", row.status))
        })?;
        if !status.grants_entry() {
            return Ok(TokenVerification::Invalid);
        }
        Ok(TokenVerification::Valid {
            gardener_name: row.gardener_name,
            space_title: row.title,
            space_address: row.address,
        })
    }
}

impl RequestRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    async fn fetch_in_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        request_id: RequestId,
    ) -> AppResult<SpaceRequest> {
        let sql = format!("{SELECT_REQUEST} WHERE r.request_id = $1");
        let row: Option<SpaceRequestRow> = sqlx::query_as(&sql)
            .bind(request_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        match row {
            None => Err(AppError::EntityNotFound(format!(
                "request {request_id} was not found"
            ))),
            Some(row) => SpaceRequest::try_from(row),
        }
    }

    async fn ensure_unoccupied(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        space_id: SpaceId,
    ) -> AppResult<()> {
        let occupant: Option<(UserId,)> = sqlx::query_as(
            "SELECT gardener_id FROM space_requests WHERE space_id = $1 AND status = 'active' LIMIT 1",
        )
        .bind(space_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if occupant.is_some() {
            return Err(AppError::ResourceConflict(format!(
                "space {space_id} is currently in use"
            )));
        }
        Ok(())
    }

    /// Compare-and-set on the status column. The guard catches a writer
    /// that slipped in between our read and this update.
    async fn transition(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        request: &SpaceRequest,
        next: RequestStatus,
    ) -> AppResult<()> {
        let res = sqlx::query(
            "UPDATE space_requests SET status = $1 WHERE request_id = $2 AND status = $3",
        )
        .bind(next.as_ref())
        .bind(request.request_id)
        .bind(request.status.as_ref())
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::InvalidTransition(format!(
                "request {} changed state concurrently",
                request.request_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kernel::{
        model::{
            role::Role,
            space::event::CreateSpace,
            user::event::CreateUser,
        },
        repository::{space::SpaceRepository, user::UserRepository},
    };

    use super::*;
    use crate::repository::{space::SpaceRepositoryImpl, user::UserRepositoryImpl};

    async fn seed_user(
        db: &ConnectionPool,
        name: &str,
        email: &str,
        role: Role,
    ) -> AppResult<UserId> {
        let user = UserRepositoryImpl::new(db.clone())
            .create(CreateUser {
                name: name.into(),
                email: email.into(),
                password: "correct-horse".into(),
                role,
            })
            .await?;
        Ok(user.user_id)
    }

    async fn seed_space(db: &ConnectionPool, owner_id: UserId) -> AppResult<SpaceId> {
        SpaceRepositoryImpl::new(db.clone())
            .create(CreateSpace {
                owner_id,
                title: "Rooftop plot".into(),
                description: None,
                address: "12 Sukhumvit Rd, Bangkok".into(),
                area_size: None,
                farm_type: Some("rooftop".into()),
                available_from: None,
                available_to: None,
                amenities: vec![],
                rules: None,
                image_url: None,
            })
            .await
    }

    struct Fixture {
        repo: RequestRepositoryImpl,
        owner: UserId,
        gardener: UserId,
        space: SpaceId,
    }

    async fn fixture(pool: sqlx::PgPool) -> AppResult<Fixture> {
        let db = ConnectionPool::new(pool);
        let owner = seed_user(&db, "Somsak", "owner@example.com", Role::Landowner).await?;
        let gardener = seed_user(&db, "Mali", "gardener@example.com", Role::Gardener).await?;
        let space = seed_space(&db, owner).await?;
        Ok(Fixture {
            repo: RequestRepositoryImpl::new(db),
            owner,
            gardener,
            space,
        })
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn a_new_request_is_pending_with_a_token(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let f = fixture(pool).await?;

        let req = f
            .repo
            .create(CreateRequest::new(
                f.space,
                f.gardener,
                Some("I would love to grow herbs here".into()),
            ))
            .await?;

        assert_eq!(req.status, RequestStatus::Pending);
        assert!(!req.qr_code_token.is_empty());
        assert!(req.started_at.is_none());
        assert_eq!(req.gardener.gardener_id, f.gardener);
        assert_eq!(req.gardener.gardener_name, "Mali");
        assert_eq!(req.space.owner_id, f.owner);

        let mine = f.repo.find_by_gardener(f.gardener).await?;
        assert_eq!(mine.len(), 1);
        let received = f.repo.find_received_by_owner(f.owner).await?;
        assert_eq!(received.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn requesting_twice_conflicts(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let f = fixture(pool).await?;

        f.repo
            .create(CreateRequest::new(f.space, f.gardener, None))
            .await?;
        let err = f
            .repo
            .create(CreateRequest::new(f.space, f.gardener, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceConflict(_)));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn only_the_owner_decides(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let f = fixture(pool).await?;
        let req = f
            .repo
            .create(CreateRequest::new(f.space, f.gardener, None))
            .await?;

        let err = f
            .repo
            .decide(DecideRequest::new(
                req.request_id,
                f.gardener,
                DecisionOutcome::Approved,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnauthorizedOperation(_)));

        // unchanged after the failed attempt
        let found = f.repo.find_by_id(req.request_id).await?;
        assert_eq!(
            found.map(|r| r.status),
            Some(RequestStatus::Pending)
        );
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn full_lifecycle_reaches_completed(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let f = fixture(pool).await?;
        let req = f
            .repo
            .create(CreateRequest::new(f.space, f.gardener, None))
            .await?;

        f.repo
            .decide(DecideRequest::new(
                req.request_id,
                f.owner,
                DecisionOutcome::Approved,
            ))
            .await?;

        // the owner cannot start the use on the gardener's behalf
        let err = f
            .repo
            .start(StartRequest::new(req.request_id, f.owner))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnauthorizedOperation(_)));

        f.repo
            .start(StartRequest::new(req.request_id, f.gardener))
            .await?;
        let active = f
            .repo
            .find_by_id(req.request_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("request vanished"))?;
        assert_eq!(active.status, RequestStatus::Active);
        assert!(active.started_at.is_some());

        f.repo
            .complete(CompleteRequest::new(req.request_id, f.owner))
            .await?;
        let done = f
            .repo
            .find_by_id(req.request_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("request vanished"))?;
        assert_eq!(done.status, RequestStatus::Completed);

        // terminal: completing again is refused
        let err = f
            .repo
            .complete(CompleteRequest::new(req.request_id, f.gardener))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn rejection_is_terminal(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let f = fixture(pool).await?;
        let req = f
            .repo
            .create(CreateRequest::new(f.space, f.gardener, None))
            .await?;

        f.repo
            .decide(DecideRequest::new(
                req.request_id,
                f.owner,
                DecisionOutcome::Rejected,
            ))
            .await?;

        let err = f
            .repo
            .decide(DecideRequest::new(
                req.request_id,
                f.owner,
                DecisionOutcome::Approved,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        let err = f
            .repo
            .start(StartRequest::new(req.request_id, f.gardener))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn an_occupied_space_blocks_new_requests(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let f = fixture(pool).await?;
        let db = ConnectionPool::new(f.repo.db.inner_ref().clone());
        let second = seed_user(&db, "Anong", "second@example.com", Role::Gardener).await?;

        let req = f
            .repo
            .create(CreateRequest::new(f.space, f.gardener, None))
            .await?;
        f.repo
            .decide(DecideRequest::new(
                req.request_id,
                f.owner,
                DecisionOutcome::Approved,
            ))
            .await?;
        f.repo
            .start(StartRequest::new(req.request_id, f.gardener))
            .await?;

        let err = f
            .repo
            .create(CreateRequest::new(f.space, second, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceConflict(_)));

        // completing frees the space again
        f.repo
            .complete(CompleteRequest::new(req.request_id, f.gardener))
            .await?;
        f.repo
            .create(CreateRequest::new(f.space, second, None))
            .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn approving_a_second_request_while_occupied_conflicts(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let f = fixture(pool).await?;
        let db = ConnectionPool::new(f.repo.db.inner_ref().clone());
        let second = seed_user(&db, "Anong", "second@example.com", Role::Gardener).await?;

        let first = f
            .repo
            .create(CreateRequest::new(f.space, f.gardener, None))
            .await?;
        let other = f
            .repo
            .create(CreateRequest::new(f.space, second, None))
            .await?;

        f.repo
            .decide(DecideRequest::new(
                first.request_id,
                f.owner,
                DecisionOutcome::Approved,
            ))
            .await?;
        f.repo
            .start(StartRequest::new(first.request_id, f.gardener))
            .await?;

        let err = f
            .repo
            .decide(DecideRequest::new(
                other.request_id,
                f.owner,
                DecisionOutcome::Approved,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceConflict(_)));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn tokens_verify_fail_closed(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let f = fixture(pool).await?;
        let req = f
            .repo
            .create(CreateRequest::new(f.space, f.gardener, None))
            .await?;

        // pending does not grant entry
        assert_eq!(
            f.repo.verify_token(&req.qr_code_token).await?,
            TokenVerification::Invalid
        );
        assert_eq!(
            f.repo.verify_token("no-such-token").await?,
            TokenVerification::Invalid
        );

        f.repo
            .decide(DecideRequest::new(
                req.request_id,
                f.owner,
                DecisionOutcome::Approved,
            ))
            .await?;
        let verified = f.repo.verify_token(&req.qr_code_token).await?;
        assert_eq!(
            verified,
            TokenVerification::Valid {
                gardener_name: "Mali".into(),
                space_title: "Rooftop plot".into(),
                space_address: "12 Sukhumvit Rd, Bangkok".into(),
            }
        );

        f.repo
            .start(StartRequest::new(req.request_id, f.gardener))
            .await?;
        assert!(matches!(
            f.repo.verify_token(&req.qr_code_token).await?,
            TokenVerification::Valid { .. }
        ));

        f.repo
            .complete(CompleteRequest::new(req.request_id, f.owner))
            .await?;
        assert_eq!(
            f.repo.verify_token(&req.qr_code_token).await?,
            TokenVerification::Invalid
        );
        Ok(())
    }
}
