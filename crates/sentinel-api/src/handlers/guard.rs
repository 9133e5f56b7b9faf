//! Authenticated ingestion endpoint.

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use validator::Validate;

use crate::error::ApiError;
use crate::models::request::GuardRequest;
use crate::models::response::GuardResponse;
use crate::state::AppState;

/// POST /v1/guard - inspect submitted messages under an API key and
/// record an audit entry.
pub async fn guard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GuardRequest>,
) -> Result<Json<GuardResponse>, ApiError> {
    request
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let entry = state.pipeline.ingest(authorization, request).await?;
    Ok(Json(GuardResponse::from(&entry)))
}
