use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use myfamily_core::error::CoreError;
use serde::Serialize;
use validator::ValidationErrors;

/// Error type returned by every handler.
///
/// Domain failures arrive as [`CoreError`]; the other variants cover what
/// only the HTTP layer can see. Rendered as `{ "error", "code" }`, with
/// `details` added for field-level validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A request DTO failed its `validator` rules.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    #[serde(skip)]
    status: StatusCode,
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    fn new(status: StatusCode, code: &'static str, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            code,
            details: None,
        }
    }

    /// Logs `cause` and hides it from the client.
    fn internal(cause: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed with an internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", INTERNAL_MESSAGE)
    }
}

impl From<&CoreError> for ErrorBody {
    fn from(err: &CoreError) -> Self {
        let (status, code) = match err {
            CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            CoreError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            CoreError::Internal(msg) => return Self::internal(msg),
        };
        Self::new(status, code, err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            AppError::Core(core) => ErrorBody::from(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Validation(errors) => ErrorBody {
                details: Some(field_messages(errors)),
                ..ErrorBody::new(
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "One or more fields are invalid",
                )
            },
            AppError::BadRequest(msg) => ErrorBody::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => ErrorBody::internal(msg),
        };
        (body.status, Json(body)).into_response()
    }
}

/// `{ field: [message, ...] }` from `validator` output.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("invalid ({})", e.code),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Postgres constraint failures become client errors: `uq_*` unique
/// violations (23505) are 409, foreign-key (23503) and check (23514)
/// violations are 400. Anything else is a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorBody {
    let sqlx::Error::Database(db_err) = err else {
        return match err {
            sqlx::Error::RowNotFound => {
                ErrorBody::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
            }
            other => ErrorBody::internal(other),
        };
    };

    let constraint = db_err.constraint().unwrap_or("unknown");
    match db_err.code().as_deref() {
        Some("23505") if constraint.starts_with("uq_") => ErrorBody::new(
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("A record with the same values already exists ({constraint})"),
        ),
        Some("23503") => ErrorBody::new(
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            format!("Referenced record does not exist ({constraint})"),
        ),
        Some("23514") => ErrorBody::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value violates check constraint: {constraint}"),
        ),
        _ => ErrorBody::internal(db_err),
    }
}
