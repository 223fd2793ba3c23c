//! Aggregate counts for the admin dashboard.

use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    pub user_count: i64,
    pub active_user_count: i64,
    pub family_count: i64,
    pub member_count: i64,
    pub relationship_count: i64,
    pub photo_count: i64,
    pub story_count: i64,
}
