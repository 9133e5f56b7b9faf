//! Route configuration.

use std::time::Duration;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::session_middleware;
use crate::state::AppState;

/// Overall per-request deadline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the application router.
///
/// ## Routes
/// - `POST /v1/guard` - authenticated ingestion (bearer API key)
/// - `POST /v1/inspect` - unauthenticated trial inspection
/// - `GET /v1/logs` - audit listing, guarded by the session middleware
/// - `GET /health`, `/health/ready`, `/health/live`, `/version`:
///   infrastructure probes, unguarded
pub fn create_router_with_state(state: AppState) -> Router {
    // Management reads: require a valid session token (or dev bypass).
    let guarded = Router::new()
        .route("/v1/logs", get(handlers::list_logs))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/health/ready", get(handlers::ready))
        .route("/health/live", get(handlers::live))
        .route("/version", get(handlers::version))
        .route("/v1/guard", post(handlers::guard))
        .route("/v1/inspect", post(handlers::inspect))
        .merge(guarded)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
