//! Repository for the `photos` table.

use myfamily_core::types::DbId;
use sqlx::PgPool;

use crate::models::photo::{CreatePhoto, Photo, StoredUpload, UpdatePhoto};

const COLUMNS: &str = "id, family_id, title, description, image_url, date_taken, location, \
                        width, height, storage_path, created_by_user_id, created_at, updated_at";

/// Provides CRUD operations for photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a photo record. `upload` is set only when the file was written
    /// to the upload directory by this server.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreatePhoto,
        upload: Option<&StoredUpload>,
    ) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (
                family_id, title, description, image_url, date_taken, location,
                width, height, storage_path, created_by_user_id
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(input.family_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.date_taken)
            .bind(&input.location)
            .bind(upload.map(|u| u.width))
            .bind(upload.map(|u| u.height))
            .bind(upload.map(|u| u.storage_path.as_str()))
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1");
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List photos, optionally restricted to one family, newest first.
    pub async fn list(pool: &PgPool, family_id: Option<DbId>) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photos
             WHERE ($1::BIGINT IS NULL OR family_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(family_id)
            .fetch_all(pool)
            .await
    }

    /// Update photo metadata. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePhoto,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!(
            "UPDATE photos SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                date_taken = COALESCE($5, date_taken),
                location = COALESCE($6, location)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.date_taken)
            .bind(&input.location)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
