//! Photo entity model and DTOs.

use myfamily_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

/// A photo row from the `photos` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Photo {
    pub id: DbId,
    pub family_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub date_taken: Option<Date>,
    pub location: Option<String>,
    /// Pixel size, known only for files uploaded through the API.
    pub width: Option<i32>,
    pub height: Option<i32>,
    /// Path of the stored file relative to the upload directory. Only the
    /// upload handler sets it.
    #[serde(skip)]
    #[ts(skip)]
    pub storage_path: Option<String>,
    pub created_by_user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a photo record. The creator comes from the auth token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePhoto {
    pub family_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub image_url: String,
    pub date_taken: Option<Date>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

/// A file written to the upload directory, with its probed pixel size.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub storage_path: String,
    pub width: i32,
    pub height: i32,
}

/// DTO for updating photo metadata. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePhoto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub image_url: Option<String>,
    pub date_taken: Option<Date>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
}
