//! Role and ownership checks layered on [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use myfamily_core::error::CoreError;
use myfamily_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `Administrator` role; 403 otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(CoreError::Forbidden("Administrator role required".into()).into());
        }
        Ok(RequireAdmin(user))
    }
}

/// Any authenticated user. Same as [`AuthUser`], named for route signatures
/// where "must be signed in" is the whole rule.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::from_request_parts(parts, state)
            .await
            .map(RequireAuth)
    }
}

/// Writes to a user-owned record are allowed for its creator and for
/// administrators.
pub fn ensure_owner_or_admin(
    user: &AuthUser,
    created_by_user_id: DbId,
    entity: &'static str,
) -> Result<(), AppError> {
    if user.is_admin() || user.user_id == created_by_user_id {
        Ok(())
    } else {
        Err(CoreError::not_owner(entity).into())
    }
}
