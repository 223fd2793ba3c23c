//! Liveness probe, mounted at the root outside `/api`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every check passes, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub uploads_ready: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = myfamily_db::health_check(&state.pool).await.is_ok();
    let uploads_ready = tokio::fs::metadata(&state.config.upload_dir)
        .await
        .is_ok_and(|meta| meta.is_dir());

    if !db_healthy || !uploads_ready {
        tracing::warn!(db_healthy, uploads_ready, "Health check degraded");
    }
    Json(HealthResponse {
        status: if db_healthy && uploads_ready { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        uploads_ready,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
