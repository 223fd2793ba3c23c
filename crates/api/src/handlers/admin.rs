//! Handlers for `/admin`: dashboard counts and user management.
//!
//! Every handler takes [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use myfamily_core::error::CoreError;
use myfamily_core::types::DbId;
use myfamily_db::models::dashboard::DashboardStats;
use myfamily_db::models::user::{UpdateUser, User, UserResponse};
use myfamily_db::repositories::{DashboardRepo, RoleRepo, SessionRepo, UserRepo};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DashboardStats>> {
    Ok(Json(DashboardRepo::stats(&state.pool).await?))
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    // One roles query instead of one per user.
    let roles = RoleRepo::list(&state.pool).await?;

    let responses = users
        .iter()
        .map(|u| {
            let role = roles
                .iter()
                .find(|r| r.id == u.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            UserResponse::new(u, role)
        })
        .collect();
    Ok(Json(responses))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("User", id))?;
    respond(&state, &user).await
}

/// PUT /api/admin/users/{id}
///
/// Edit profile fields, role, or active flag. Administrators cannot demote
/// or deactivate themselves.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;

    if id == admin.user_id && (input.is_active == Some(false) || input.role_id.is_some()) {
        return Err(CoreError::Validation(
            "Administrators cannot change their own role or deactivate themselves".into(),
        )
        .into());
    }
    if let Some(role_id) = input.role_id {
        if !RoleRepo::exists(&state.pool, role_id).await? {
            return Err(CoreError::Validation(format!("Unknown role id {role_id}")).into());
        }
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("User", id))?;
    if !user.is_active {
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    }
    tracing::info!(user_id = id, admin_id = admin.user_id, "User updated by administrator");
    respond(&state, &user).await
}

/// DELETE /api/admin/users/{id}
///
/// Deactivates rather than deletes; the user's records stay attributed.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(CoreError::Validation("Administrators cannot deactivate themselves".into()).into());
    }
    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(CoreError::not_found("User", id).into());
    }
    // Already-inactive users are a no-op.
    if UserRepo::deactivate(&state.pool, id).await? {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(user_id = id, admin_id = admin.user_id, revoked, "User deactivated");
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn respond(state: &AppState, user: &User) -> AppResult<Json<UserResponse>> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(UserResponse::new(user, role)))
}
