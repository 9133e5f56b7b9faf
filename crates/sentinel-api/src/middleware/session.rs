//! Session guard for management reads.
//!
//! Validates the signed session headers on guarded routes and inserts
//! the authenticated identity into request extensions. In bypassed mode
//! (development only; rejected at config load for production) a fixed
//! dev identity is substituted and no headers are required.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::config::AuthMode;
use crate::error::ApiError;
use crate::session::SessionToken;
use crate::state::AppState;

/// Identity substituted when authentication is bypassed.
const DEV_USER: &str = "dev";

/// Authenticated session identity, available to guarded handlers.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user: String,
}

/// Middleware enforcing a valid session token on guarded routes.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if state.config.auth.mode == AuthMode::Bypassed {
        request.extensions_mut().insert(SessionUser {
            user: DEV_USER.to_string(),
        });
        return next.run(request).await;
    }

    let token = SessionToken {
        user: header_value(&request, "x-session-user"),
        signature: header_value(&request, "x-session-signature"),
        issued_at: header_value(&request, "x-session-issued-at"),
    };

    if token.user.is_empty() || token.signature.is_empty() || token.issued_at.is_empty() {
        return ApiError::invalid_session(
            "Provide x-session-user, x-session-signature, and x-session-issued-at headers",
        )
        .into_response();
    }

    if let Err(err) = token.validate(&state.session_keys, state.config.auth.token_ttl_seconds) {
        return err.into_response();
    }

    request.extensions_mut().insert(SessionUser { user: token.user });
    next.run(request).await
}

fn header_value(request: &Request, name: &str) -> String {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
