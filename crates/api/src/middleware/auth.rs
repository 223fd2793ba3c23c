//! Bearer-token extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use myfamily_core::error::CoreError;
use myfamily_core::roles::ROLE_ADMINISTRATOR;
use myfamily_core::types::DbId;
use myfamily_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity decoded from the `Authorization: Bearer <token>` header.
///
/// Any handler that takes an `AuthUser` rejects anonymous requests with 401.
/// The account is looked up on every request, so a deactivated user's
/// still-unexpired token stops working immediately.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMINISTRATOR
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            CoreError::Unauthorized("Expected Authorization: Bearer <token>".into())
        })?;

        let claims = validate_token(token.trim(), &state.config.jwt)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))?;

        if !UserRepo::is_active(&state.pool, claims.sub).await? {
            return Err(CoreError::Unauthorized("Account is deactivated".into()).into());
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
