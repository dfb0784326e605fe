// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::notify::NotifyError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail already registered")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("Not enough loyalty points: has {available}, requested {requested}")]
    InsufficientPoints { available: i32, requested: i32 },

    #[error("Coupon rejected: {0}")]
    CouponRejected(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Notification dispatch failed: {0}")]
    NotificationFailed(#[from] NotifyError),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    // Anything unexpected. `anyhow::Error` carries the context.
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists | AppError::UniqueConstraintViolation(_) => {
                StatusCode::CONFLICT
            }
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientPoints { .. } | AppError::CouponRejected(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NotificationFailed(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Maps a unique violation to a conflict, anything else stays a database error.
    pub fn from_unique_violation(e: sqlx::Error, what: impl Into<String>) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::UniqueConstraintViolation(what.into());
            }
        }
        e.into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            // Return every field error, not only the first one.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::EmailAlreadyExists => "This e-mail is already in use.".to_string(),
            AppError::InvalidCredentials => "Invalid e-mail or password.".to_string(),
            AppError::InvalidToken => "Missing or invalid authentication token.".to_string(),
            ref e @ (AppError::Forbidden(_)
            | AppError::ResourceNotFound(_)
            | AppError::UniqueConstraintViolation(_)
            | AppError::InsufficientPoints { .. }
            | AppError::CouponRejected(_)
            | AppError::BadRequest(_)) => e.to_string(),
            AppError::NotificationFailed(ref e) => {
                tracing::error!("Notification batch failed: {}", e);
                "Could not deliver the notification batch.".to_string()
            }

            // Everything else becomes a 500; the detailed message only goes to the log.
            ref e => {
                tracing::error!("Internal server error: {:?}", e);
                "An unexpected error occurred.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_map_to_client_statuses() {
        assert_eq!(
            AppError::ResourceNotFound("customer".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InsufficientPoints { available: 10, requested: 50 }.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::UniqueConstraintViolation("code".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::Forbidden("admin".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn notification_failure_is_a_bad_gateway() {
        let err = AppError::from(NotifyError::Rejected { status: 500, body: "boom".into() });
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unexpected_errors_are_internal() {
        let err = AppError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
