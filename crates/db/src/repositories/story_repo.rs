//! Repository for the `stories` table.

use myfamily_core::types::DbId;
use sqlx::PgPool;

use crate::models::story::{CreateStory, Story, UpdateStory};

const COLUMNS: &str = "id, family_id, member_id, title, content, event_date, \
                        created_by_user_id, created_at, updated_at";

/// Provides CRUD operations for stories.
pub struct StoryRepo;

impl StoryRepo {
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateStory,
    ) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories (family_id, member_id, title, content, event_date, created_by_user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(input.family_id)
            .bind(input.member_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.event_date)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List stories, optionally restricted to one family, newest first.
    pub async fn list(pool: &PgPool, family_id: Option<DbId>) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories
             WHERE ($1::BIGINT IS NULL OR family_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(family_id)
            .fetch_all(pool)
            .await
    }

    /// Stories attached to one member, newest first.
    pub async fn list_by_member(pool: &PgPool, member_id: DbId) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories
             WHERE member_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(member_id)
            .fetch_all(pool)
            .await
    }

    /// Update a story. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStory,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET
                member_id = COALESCE($2, member_id),
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                event_date = COALESCE($5, event_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(input.member_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.event_date)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
