//! Family entity model and DTOs.

use myfamily_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

/// A family row from the `families` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Family {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_by_user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A family with the number of records it owns, as returned by catalog queries.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct FamilyOverview {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_by_user_id: DbId,
    pub member_count: i64,
    pub photo_count: i64,
    pub story_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new family. The creator comes from the auth token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFamily {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// DTO for updating an existing family. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateFamily {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}
