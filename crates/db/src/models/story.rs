//! Story entity model and DTOs.

use myfamily_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

/// A story row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Story {
    pub id: DbId,
    pub family_id: DbId,
    /// Member the story is about, if any.
    pub member_id: Option<DbId>,
    pub title: String,
    pub content: String,
    pub event_date: Option<Date>,
    pub created_by_user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new story. The creator comes from the auth token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStory {
    pub family_id: DbId,
    pub member_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 50000))]
    pub content: String,
    pub event_date: Option<Date>,
}

/// DTO for updating an existing story. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStory {
    pub member_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50000))]
    pub content: Option<String>,
    pub event_date: Option<Date>,
}
