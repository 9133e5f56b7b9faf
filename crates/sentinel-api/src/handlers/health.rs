//! Infrastructure probes.

use axum::Json;
use serde_json::{json, Value};

/// GET /health - basic health check.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// GET /health/ready - readiness probe.
pub async fn ready() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}

/// GET /health/live - liveness probe.
pub async fn live() -> Json<Value> {
    Json(json!({ "status": "alive" }))
}

/// GET /version - build information.
pub async fn version() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
