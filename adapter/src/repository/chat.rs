use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::{
    model::{
        chat::{event::PostChatMessage, ChatMessage},
        id::{MessageId, RequestId},
    },
    repository::chat::ChatMessageRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::chat::ChatMessageRow, ConnectionPool};

const SELECT_MESSAGE: &str = r#"
    SELECT
    m.message_id,
    m.request_id,
    m.sender_id,
    p.name AS sender_name,
    m.message,
    m.created_at
    FROM chat_messages AS m
    INNER JOIN profiles AS p ON m.sender_id = p.user_id
"#;

#[derive(new)]
pub struct ChatMessageRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ChatMessageRepository for ChatMessageRepositoryImpl {
    async fn post(&self, event: PostChatMessage) -> AppResult<ChatMessage> {
        let message_id = MessageId::new();
        sqlx::query(
            r#"
                INSERT INTO chat_messages (message_id, request_id, sender_id, message)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(message_id)
        .bind(event.request_id)
        .bind(event.sender_id)
        .bind(&event.message)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let sql = format!("{SELECT_MESSAGE} WHERE m.message_id = $1");
        let row: ChatMessageRow = sqlx::query_as(&sql)
            .bind(message_id)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(ChatMessage::from(row))
    }

    async fn find_by_request_id(
        &self,
        request_id: RequestId,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<ChatMessage>> {
        let sql = format!(
            r#"{SELECT_MESSAGE}
                WHERE m.request_id = $1
                AND ($2::timestamptz IS NULL OR m.created_at > $2)
                ORDER BY m.created_at ASC
            "#
        );
        let rows: Vec<ChatMessageRow> = sqlx::query_as(&sql)
            .bind(request_id)
            .bind(since)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use kernel::{
        model::{
            id::{SpaceId, UserId},
            request::event::CreateRequest,
            role::Role,
            space::event::CreateSpace,
            user::event::CreateUser,
        },
        repository::{
            request::RequestRepository, space::SpaceRepository, user::UserRepository,
        },
    };

    use super::*;
    use crate::repository::{
        request::RequestRepositoryImpl, space::SpaceRepositoryImpl, user::UserRepositoryImpl,
    };

    async fn seed_request(db: &ConnectionPool) -> AppResult<(RequestId, UserId, UserId)> {
        let users = UserRepositoryImpl::new(db.clone());
        let owner = users
            .create(CreateUser {
                name: "Somsak".into(),
                email: "owner@example.com".into(),
                password: "correct-horse".into(),
                role: Role::Landowner,
            })
            .await?
            .user_id;
        let gardener = users
            .create(CreateUser {
                name: "Mali".into(),
                email: "gardener@example.com".into(),
                password: "correct-horse".into(),
                role: Role::Gardener,
            })
            .await?
            .user_id;
        let space: SpaceId = SpaceRepositoryImpl::new(db.clone())
            .create(CreateSpace {
                owner_id: owner,
                title: "Rooftop plot".into(),
                description: None,
                address: "12 Sukhumvit Rd, Bangkok".into(),
                area_size: None,
                farm_type: None,
                available_from: None,
                available_to: None,
                amenities: vec![],
                rules: None,
                image_url: None,
            })
            .await?;
        let request = RequestRepositoryImpl::new(db.clone())
            .create(CreateRequest::new(space, gardener, None))
            .await?;
        Ok((request.request_id, owner, gardener))
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn messages_come_back_oldest_first(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let (request_id, owner, gardener) = seed_request(&db).await?;
        let repo = ChatMessageRepositoryImpl::new(db);

        repo.post(PostChatMessage::new(
            request_id,
            gardener,
            "When can I visit?".into(),
        ))
        .await?;
        repo.post(PostChatMessage::new(
            request_id,
            owner,
            "Saturday morning works".into(),
        ))
        .await?;

        let all = repo.find_by_request_id(request_id, None).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].message, "When can I visit?");
        assert_eq!(all[0].sender_name, "Mali");
        assert_eq!(all[1].message, "Saturday morning works");
        assert_eq!(all[1].sender_name, "Somsak");

        // polling with the last seen timestamp only returns newer rows
        let newer = repo
            .find_by_request_id(request_id, Some(all[0].created_at))
            .await?;
        assert_eq!(newer.len(), 1);
        assert_eq!(newer[0].message, "Saturday morning works");

        let none = repo
            .find_by_request_id(request_id, Some(all[1].created_at))
            .await?;
        assert!(none.is_empty());
        Ok(())
    }
}
