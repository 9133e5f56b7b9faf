//! API error taxonomy and HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sentinel_store::StoreError;
use serde_json::json;

/// Errors surfaced to API callers.
///
/// Authentication failures are terminal and leave no persisted side
/// effects; store failures are fatal for the request that hit them and
/// are reported distinctly so callers can apply their own retry policy.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing, malformed, or unknown credential or session token.
    #[error("{message}")]
    Unauthorized {
        code: &'static str,
        message: String,
    },

    /// The request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// The storage backend failed; nothing was recorded.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn missing_credential() -> Self {
        Self::Unauthorized {
            code: "API_KEY_REQUIRED",
            message: "Provide an API key via the Authorization: Bearer header".to_string(),
        }
    }

    pub fn unknown_credential() -> Self {
        Self::Unauthorized {
            code: "INVALID_API_KEY",
            message: "The supplied API key is not recognized".to_string(),
        }
    }

    pub fn invalid_session(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code: "INVALID_SESSION_TOKEN",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, code, message) = match &self {
            ApiError::Unauthorized { code, message } => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                *code,
                message.clone(),
            ),
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                "Invalid Request",
                "INVALID_REQUEST",
                message.clone(),
            ),
            ApiError::Store(err) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Store Unavailable",
                "STORE_UNAVAILABLE",
                err.to_string(),
            ),
        };

        (
            status,
            Json(json!({
                "error": error,
                "message": message,
                "code": code,
            })),
        )
            .into_response()
    }
}
