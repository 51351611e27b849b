//! Shared API types
//!
//! Error responses are `{error, code, message}` JSON.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::users::{IdField, UserAnalyticsError};

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    ServiceUnavailable { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Map a user analytics failure; store details are logged, never returned
    pub fn from_users(e: UserAnalyticsError) -> Self {
        match e {
            UserAnalyticsError::Validation { field, message } => {
                let code = match field {
                    IdField::ProjectId => "INVALID_PROJECT_ID",
                    IdField::UserId => "INVALID_USER_ID",
                };
                Self::bad_request(code, format!("{} {}", field, message))
            }
            UserAnalyticsError::Consistency { .. } => {
                tracing::error!(error = %e, "User analytics consistency failure");
                Self::internal("Failed to aggregate user analytics")
            }
            UserAnalyticsError::Upstream(ref data) if data.is_transient() => {
                tracing::warn!(error = %e, "User analytics query unavailable");
                Self::service_unavailable("Analytics query timed out or store is busy")
            }
            UserAnalyticsError::Upstream(_) => {
                tracing::error!(error = %e, "User analytics query failed");
                Self::internal("Database operation failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::ServiceUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "SERVICE_UNAVAILABLE".to_string(),
                message,
            ),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}
