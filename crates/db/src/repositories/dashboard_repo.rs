//! Aggregate counts for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::DashboardStats;

pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS user_count,
                (SELECT COUNT(*) FROM users WHERE is_active) AS active_user_count,
                (SELECT COUNT(*) FROM families) AS family_count,
                (SELECT COUNT(*) FROM family_members) AS member_count,
                (SELECT COUNT(*) FROM relationships) AS relationship_count,
                (SELECT COUNT(*) FROM photos) AS photo_count,
                (SELECT COUNT(*) FROM stories) AS story_count",
        )
        .fetch_one(pool)
        .await
    }
}
