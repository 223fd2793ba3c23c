//! Repository for the `family_members` table.

use myfamily_core::pagination::substring_pattern;
use myfamily_core::types::DbId;
use sqlx::PgPool;

use crate::models::member::{CreateFamilyMember, FamilyMember, UpdateFamilyMember};

const COLUMNS: &str = "id, family_id, first_name, middle_name, last_name, gender, \
                        date_of_birth, place_of_birth, date_of_death, place_of_death, \
                        biography, profile_picture_url, created_by_user_id, created_at, updated_at";

/// Provides CRUD operations for family members.
pub struct MemberRepo;

impl MemberRepo {
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateFamilyMember,
    ) -> Result<FamilyMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO family_members (
                family_id, first_name, middle_name, last_name, gender,
                date_of_birth, place_of_birth, date_of_death, place_of_death,
                biography, profile_picture_url, created_by_user_id
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FamilyMember>(&query)
            .bind(input.family_id)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.last_name)
            .bind(&input.gender)
            .bind(input.date_of_birth)
            .bind(&input.place_of_birth)
            .bind(input.date_of_death)
            .bind(&input.place_of_death)
            .bind(&input.biography)
            .bind(&input.profile_picture_url)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FamilyMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM family_members WHERE id = $1");
        sqlx::query_as::<_, FamilyMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List members, optionally restricted to one family and/or to names
    /// containing `search` (case-insensitive). Ordered by last, first name.
    pub async fn list(
        pool: &PgPool,
        family_id: Option<DbId>,
        search: Option<&str>,
    ) -> Result<Vec<FamilyMember>, sqlx::Error> {
        let pattern = search.and_then(substring_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM family_members
             WHERE ($1::BIGINT IS NULL OR family_id = $1)
               AND ($2::TEXT IS NULL
                    OR first_name ILIKE $2
                    OR middle_name ILIKE $2
                    OR last_name ILIKE $2)
             ORDER BY last_name ASC, first_name ASC, id ASC"
        );
        sqlx::query_as::<_, FamilyMember>(&query)
            .bind(family_id)
            .bind(&pattern)
            .fetch_all(pool)
            .await
    }

    /// All members of one family, ordered by last, first name.
    pub async fn list_by_family(
        pool: &PgPool,
        family_id: DbId,
    ) -> Result<Vec<FamilyMember>, sqlx::Error> {
        Self::list(pool, Some(family_id), None).await
    }

    /// Update a member. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFamilyMember,
    ) -> Result<Option<FamilyMember>, sqlx::Error> {
        let query = format!(
            "UPDATE family_members SET
                first_name = COALESCE($2, first_name),
                middle_name = COALESCE($3, middle_name),
                last_name = COALESCE($4, last_name),
                gender = COALESCE($5, gender),
                date_of_birth = COALESCE($6, date_of_birth),
                place_of_birth = COALESCE($7, place_of_birth),
                date_of_death = COALESCE($8, date_of_death),
                place_of_death = COALESCE($9, place_of_death),
                biography = COALESCE($10, biography),
                profile_picture_url = COALESCE($11, profile_picture_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FamilyMember>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.last_name)
            .bind(&input.gender)
            .bind(input.date_of_birth)
            .bind(&input.place_of_birth)
            .bind(input.date_of_death)
            .bind(&input.place_of_death)
            .bind(&input.biography)
            .bind(&input.profile_picture_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a member; its relationships go with it, its stories are detached.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM family_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
