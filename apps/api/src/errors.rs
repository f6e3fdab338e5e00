use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::cache::CacheError;
use crate::matching::MatchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Matching error: {0}")]
    Match(#[from] MatchError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Auth(e) => match e {
                AuthError::Hashing(_) | AuthError::Encoding(_) => {
                    tracing::error!("Auth error: {e}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal server error occurred".to_string(),
                    )
                }
                _ => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", e.to_string()),
            },
            AppError::Match(e) => match e {
                MatchError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string()),
                MatchError::LoadFailure(msg) => {
                    tracing::error!("Job load failed: {msg}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "JOB_LOAD_ERROR",
                        "The job could not be loaded".to_string(),
                    )
                }
                MatchError::CacheUnavailable(msg) => {
                    tracing::error!("Job cache unavailable: {msg}");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "CACHE_UNAVAILABLE",
                        "The job cache is unavailable".to_string(),
                    )
                }
                MatchError::Cancelled => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CANCELLED",
                    e.to_string(),
                ),
            },
            AppError::Cache(e) => {
                tracing::error!("Cache error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CACHE_UNAVAILABLE",
                    "A cache error occurred".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
