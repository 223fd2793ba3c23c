//! Repository for the `relationships` table.

use myfamily_core::types::DbId;
use sqlx::PgPool;

use crate::models::relationship::{CreateRelationship, Relationship, UpdateRelationship};

const COLUMNS: &str = "id, family_id, primary_member_id, related_member_id, relationship_type, \
                        notes, created_by_user_id, created_at, updated_at";

/// Provides CRUD operations for member relationships.
pub struct RelationshipRepo;

impl RelationshipRepo {
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateRelationship,
    ) -> Result<Relationship, sqlx::Error> {
        let query = format!(
            "INSERT INTO relationships (
                family_id, primary_member_id, related_member_id,
                relationship_type, notes, created_by_user_id
             )
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Relationship>(&query)
            .bind(input.family_id)
            .bind(input.primary_member_id)
            .bind(input.related_member_id)
            .bind(input.relationship_type)
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Relationship>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM relationships WHERE id = $1");
        sqlx::query_as::<_, Relationship>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List relationships, optionally restricted to one family, oldest first.
    pub async fn list(
        pool: &PgPool,
        family_id: Option<DbId>,
    ) -> Result<Vec<Relationship>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM relationships
             WHERE ($1::BIGINT IS NULL OR family_id = $1)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Relationship>(&query)
            .bind(family_id)
            .fetch_all(pool)
            .await
    }

    /// Every relationship in which `member_id` is either end.
    pub async fn list_by_member(
        pool: &PgPool,
        member_id: DbId,
    ) -> Result<Vec<Relationship>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM relationships
             WHERE primary_member_id = $1 OR related_member_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Relationship>(&query)
            .bind(member_id)
            .fetch_all(pool)
            .await
    }

    /// Update a relationship. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRelationship,
    ) -> Result<Option<Relationship>, sqlx::Error> {
        let query = format!(
            "UPDATE relationships SET
                relationship_type = COALESCE($2, relationship_type),
                notes = COALESCE($3, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Relationship>(&query)
            .bind(id)
            .bind(input.relationship_type)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM relationships WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
