//! Accounts. The stored row carries the password hash and lockout state;
//! only [`UserResponse`] leaves the server.

use myfamily_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// `Administrator` or `User`.
    pub role: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl UserResponse {
    pub fn new(user: &User, role: String) -> Self {
        let User {
            id,
            email,
            first_name,
            last_name,
            role_id,
            is_active,
            last_login_at,
            created_at,
            ..
        } = user.clone();
        Self {
            id,
            email,
            first_name,
            last_name,
            role,
            role_id,
            is_active,
            last_login_at,
            created_at,
        }
    }
}

/// Insert payload; `password_hash` is an Argon2 PHC string.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role_id: DbId,
}

/// Admin edit of an account.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}
