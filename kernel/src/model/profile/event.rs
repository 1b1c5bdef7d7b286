use derive_new::new;

use crate::model::id::UserId;

#[derive(new)]
pub struct UpsertProfile {
    pub user_id: UserId,
    pub name: String,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
}
