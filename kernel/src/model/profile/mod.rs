use chrono::{DateTime, Utc};

use crate::model::id::UserId;

pub mod event;

/// Per-user display data, upserted only by the user it describes.
#[derive(Debug)]
pub struct Profile {
    pub user_id: UserId,
    pub name: String,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}
