//! Repository for the `families` table.

use myfamily_core::pagination::substring_pattern;
use myfamily_core::types::DbId;
use sqlx::PgPool;

use crate::models::family::{CreateFamily, Family, FamilyOverview, UpdateFamily};

const COLUMNS: &str = "id, name, description, created_by_user_id, created_at, updated_at";

/// Family columns plus per-family record counts, for catalog queries on `f`.
const OVERVIEW_COLUMNS: &str = "f.id, f.name, f.description, f.created_by_user_id, \
     (SELECT COUNT(*) FROM family_members m WHERE m.family_id = f.id) AS member_count, \
     (SELECT COUNT(*) FROM photos p WHERE p.family_id = f.id) AS photo_count, \
     (SELECT COUNT(*) FROM stories s WHERE s.family_id = f.id) AS story_count, \
     f.created_at, f.updated_at";

/// Catalog filter. `limit`/`offset` are expected to be clamped already.
#[derive(Debug, Clone, Default)]
pub struct FamilyFilter {
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    pub created_by_user_id: Option<DbId>,
    pub limit: i64,
    pub offset: i64,
}

/// Provides CRUD operations for families.
pub struct FamilyRepo;

impl FamilyRepo {
    /// Insert a new family owned by `created_by`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateFamily,
    ) -> Result<Family, sqlx::Error> {
        let query = format!(
            "INSERT INTO families (name, description, created_by_user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Family>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Family>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM families WHERE id = $1");
        sqlx::query_as::<_, Family>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a family together with its record counts.
    pub async fn find_overview(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FamilyOverview>, sqlx::Error> {
        let query = format!("SELECT {OVERVIEW_COLUMNS} FROM families f WHERE f.id = $1");
        sqlx::query_as::<_, FamilyOverview>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of families matching `filter`, newest first, plus the total
    /// number of matches.
    pub async fn list(
        pool: &PgPool,
        filter: &FamilyFilter,
    ) -> Result<(Vec<FamilyOverview>, i64), sqlx::Error> {
        let pattern = filter.search.as_deref().and_then(substring_pattern);
        let predicate = "($1::TEXT IS NULL OR f.name ILIKE $1 OR f.description ILIKE $1)
               AND ($2::BIGINT IS NULL OR f.created_by_user_id = $2)";

        let query = format!(
            "SELECT {OVERVIEW_COLUMNS} FROM families f
             WHERE {predicate}
             ORDER BY f.created_at DESC, f.id DESC
             LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, FamilyOverview>(&query)
            .bind(&pattern)
            .bind(filter.created_by_user_id)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM families f WHERE {predicate}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .bind(filter.created_by_user_id)
            .fetch_one(pool)
            .await?;

        Ok((items, total))
    }

    /// Update a family. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFamily,
    ) -> Result<Option<Family>, sqlx::Error> {
        let query = format!(
            "UPDATE families SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Family>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a family and, by cascade, everything it owns.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM families WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
