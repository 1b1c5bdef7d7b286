use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{SpaceId, UserId},
        space::{
            event::{CreateSpace, DeleteSpace, UpdateSpace},
            OwnedSpace, Space,
        },
    },
    repository::space::SpaceRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{
    model::space::{OwnedSpaceRow, SpaceRow},
    ConnectionPool,
};

const SELECT_SPACE: &str = r#"
    SELECT
    s.space_id,
    s.title,
    s.description,
    s.address,
    s.area_size,
    s.farm_type,
    s.available_from,
    s.available_to,
    s.amenities,
    s.rules,
    s.image_url,
    s.is_active,
    s.created_at,
    s.owner_id,
    p.name AS owner_name
    FROM urban_farm_spaces AS s
    INNER JOIN profiles AS p ON s.owner_id = p.user_id
"#;

#[derive(new)]
pub struct SpaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpaceRepository for SpaceRepositoryImpl {
    async fn create(&self, event: CreateSpace) -> AppResult<SpaceId> {
        let space_id = SpaceId::new();
        sqlx::query(
            r#"
                INSERT INTO urban_farm_spaces
                (space_id, owner_id, title, description, address, area_size,
                farm_type, available_from, available_to, amenities, rules, image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(space_id)
        .bind(event.owner_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.address)
        .bind(&event.area_size)
        .bind(&event.farm_type)
        .bind(event.available_from)
        .bind(event.available_to)
        .bind(&event.amenities)
        .bind(&event.rules)
        .bind(&event.image_url)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(space_id)
    }

    async fn find_active(&self, query: Option<String>) -> AppResult<Vec<Space>> {
        let sql = format!(
            r#"{SELECT_SPACE}
                WHERE s.is_active
                AND ($1::text IS NULL
                    OR s.title ILIKE '%' || $1 || '%'
                    OR s.address ILIKE '%' || $1 || '%')
                ORDER BY s.created_at DESC
            "#
        );
        let rows: Vec<SpaceRow> = sqlx::query_as(&sql)
            .bind(query)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Space::from).collect())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> AppResult<Vec<OwnedSpace>> {
        let sql = format!(
            r#"
                SELECT q.*,
                (
                    SELECT COUNT(*) FROM space_requests AS r
                    WHERE r.space_id = q.space_id AND r.status = 'pending'
                ) AS pending_requests
                FROM ({SELECT_SPACE} WHERE s.owner_id = $1) AS q
                ORDER BY q.created_at DESC
            "#
        );
        let rows: Vec<OwnedSpaceRow> = sqlx::query_as(&sql)
            .bind(owner_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(OwnedSpace::from).collect())
    }

    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        let sql = format!("{SELECT_SPACE} WHERE s.space_id = $1");
        let row: Option<SpaceRow> = sqlx::query_as(&sql)
            .bind(space_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(row.map(Space::from))
    }

    async fn update(&self, event: UpdateSpace) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.ensure_owned(&mut tx, event.space_id, event.requested_user)
            .await?;

        sqlx::query(
            r#"
                UPDATE urban_farm_spaces SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    address = COALESCE($4, address),
                    area_size = COALESCE($5, area_size),
                    farm_type = COALESCE($6, farm_type),
                    available_from = COALESCE($7, available_from),
                    available_to = COALESCE($8, available_to),
                    amenities = COALESCE($9, amenities),
                    rules = COALESCE($10, rules),
                    image_url = COALESCE($11, image_url),
                    is_active = COALESCE($12, is_active)
                WHERE space_id = $1
            "#,
        )
        .bind(event.space_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.address)
        .bind(&event.area_size)
        .bind(&event.farm_type)
        .bind(event.available_from)
        .bind(event.available_to)
        .bind(&event.amenities)
        .bind(&event.rules)
        .bind(&event.image_url)
        .bind(event.is_active)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn delete(&self, event: DeleteSpace) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.ensure_owned(&mut tx, event.space_id, event.requested_user)
            .await?;

        sqlx::query("DELETE FROM urban_farm_spaces WHERE space_id = $1")
            .bind(event.space_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }
}

impl SpaceRepositoryImpl {
    async fn ensure_owned(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        space_id: SpaceId,
        requested_user: UserId,
    ) -> AppResult<()> {
        let owner: Option<(UserId,)> =
            sqlx::query_as("SELECT owner_id FROM urban_farm_spaces WHERE space_id = $1")
                .bind(space_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        match owner {
            None => Err(AppError::EntityNotFound(format!(
                "space {space_id} was not found"
            ))),
            Some((owner_id,)) if owner_id != requested_user => Err(
                AppError::UnauthorizedOperation("only the owner can manage this space".into()),
            ),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use kernel::{
        model::{role::Role, user::event::CreateUser},
        repository::user::UserRepository,
    };

    use super::*;
    use crate::repository::user::UserRepositoryImpl;

    async fn seed_user(pool: &ConnectionPool, email: &str, role: Role) -> AppResult<UserId> {
        let user = UserRepositoryImpl::new(pool.clone())
            .create(CreateUser {
                name: "Somsak".into(),
                email: email.into(),
                password: "correct-horse".into(),
                role,
            })
            .await?;
        Ok(user.user_id)
    }

    fn listing(owner_id: UserId, title: &str) -> CreateSpace {
        CreateSpace {
            owner_id,
            title: title.into(),
            description: Some("Sunny rooftop with rain barrels".into()),
            address: "12 Sukhumvit Rd, Bangkok".into(),
            area_size: Some("40 sqm".into()),
            farm_type: Some("rooftop".into()),
            available_from: None,
            available_to: None,
            amenities: vec!["water".into(), "toolshed".into()],
            rules: Some("organic only".into()),
            image_url: None,
        }
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn register_and_browse_spaces(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let repo = SpaceRepositoryImpl::new(db.clone());
        let owner_id = seed_user(&db, "owner@example.com", Role::Landowner).await?;

        let space_id = repo.create(listing(owner_id, "Rooftop plot")).await?;

        let found = repo.find_by_id(space_id).await?;
        let space = found.ok_or_else(|| anyhow::anyhow!("space not stored"))?;
        assert_eq!(space.title, "Rooftop plot");
        assert_eq!(space.owner.owner_id, owner_id);
        assert_eq!(space.owner.owner_name, "Somsak");
        assert_eq!(space.amenities, vec!["water", "toolshed"]);
        assert!(space.is_active);

        let all = repo.find_active(None).await?;
        assert_eq!(all.len(), 1);

        let hit = repo.find_active(Some("rooftop".into())).await?;
        assert_eq!(hit.len(), 1);
        let miss = repo.find_active(Some("basement".into())).await?;
        assert!(miss.is_empty());
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn deactivated_spaces_leave_the_listing(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let repo = SpaceRepositoryImpl::new(db.clone());
        let owner_id = seed_user(&db, "owner@example.com", Role::Landowner).await?;
        let space_id = repo.create(listing(owner_id, "Rooftop plot")).await?;

        repo.update(UpdateSpace {
            space_id,
            requested_user: owner_id,
            title: None,
            description: None,
            address: None,
            area_size: None,
            farm_type: None,
            available_from: None,
            available_to: None,
            amenities: None,
            rules: None,
            image_url: None,
            is_active: Some(false),
        })
        .await?;

        assert!(repo.find_active(None).await?.is_empty());
        // the owner still sees it on the dashboard
        let owned = repo.find_by_owner(owner_id).await?;
        assert_eq!(owned.len(), 1);
        assert!(!owned[0].space.is_active);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn only_the_owner_can_update_or_delete(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let repo = SpaceRepositoryImpl::new(db.clone());
        let owner_id = seed_user(&db, "owner@example.com", Role::Landowner).await?;
        let other_id = seed_user(&db, "other@example.com", Role::Landowner).await?;
        let space_id = repo.create(listing(owner_id, "Rooftop plot")).await?;

        let err = repo
            .delete(DeleteSpace {
                space_id,
                requested_user: other_id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnauthorizedOperation(_)));

        repo.delete(DeleteSpace {
            space_id,
            requested_user: owner_id,
        })
        .await?;
        assert!(repo.find_by_id(space_id).await?.is_none());
        Ok(())
    }
}
