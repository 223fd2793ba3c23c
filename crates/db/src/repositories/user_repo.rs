//! Accounts and their login bookkeeping.

use myfamily_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

const COLUMNS: &str = "id, email, first_name, last_name, password_hash, role_id, is_active, \
                        failed_login_count, locked_until, last_login_at, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, first_name, last_name, password_hash, role_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.password_hash)
        .bind(input.role_id)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Emails are matched case-insensitively.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Newest accounts first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(pool)
        .await
    }

    /// Admin edit. Omitted fields keep their stored value; `None` when the
    /// account does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET email      = COALESCE(LOWER($2), email),
                 first_name = COALESCE($3, first_name),
                 last_name  = COALESCE($4, last_name),
                 role_id    = COALESCE($5, role_id),
                 is_active  = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.role_id)
        .bind(input.is_active)
        .fetch_optional(pool)
        .await
    }

    /// `false` for inactive or missing users.
    pub async fn is_active(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT is_active FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map(|active| active.unwrap_or(false))
    }

    /// `true` when the account flipped from active to inactive.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1 AND is_active")
            .bind(id)
            .execute(pool)
            .await
            .map(|done| done.rows_affected() == 1)
    }

    /// Count one failed password check. Once the running count reaches
    /// `max_failures` the account is locked for `lock_mins` minutes. A lock
    /// that has already expired starts the count over at one.
    ///
    /// Returns the new count and the lock expiry, if any.
    pub async fn record_failed_login(
        pool: &PgPool,
        id: DbId,
        max_failures: i32,
        lock_mins: i32,
    ) -> Result<(i32, Option<Timestamp>), sqlx::Error> {
        sqlx::query_as::<_, (i32, Option<Timestamp>)>(
            "UPDATE users
             SET failed_login_count = CASE
                     WHEN locked_until <= NOW() THEN 1
                     ELSE failed_login_count + 1
                 END,
                 locked_until = CASE
                     WHEN (CASE WHEN locked_until <= NOW() THEN 1 ELSE failed_login_count + 1 END) >= $2
                         THEN NOW() + make_interval(mins => $3)
                     WHEN locked_until <= NOW() THEN NULL
                     ELSE locked_until
                 END
             WHERE id = $1
             RETURNING failed_login_count, locked_until",
        )
        .bind(id)
        .bind(max_failures)
        .bind(lock_mins)
        .fetch_one(pool)
        .await
    }

    /// Clear the failure count and any lock, and stamp `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users
             SET failed_login_count = 0, locked_until = NULL, last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await
        .map(|_| ())
    }

    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await
            .map(|done| done.rows_affected() == 1)
    }
}
