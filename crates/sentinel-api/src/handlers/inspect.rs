//! Unauthenticated trial inspection.

use axum::extract::State;
use axum::Json;
use sentinel_core::Verdict;
use validator::Validate;

use crate::error::ApiError;
use crate::models::request::InspectRequest;
use crate::state::AppState;

/// POST /v1/inspect - run the detector set over ad hoc text and return
/// the full ordered verdict list. No credential required; nothing is
/// recorded.
pub async fn inspect(
    State(state): State<AppState>,
    Json(request): Json<InspectRequest>,
) -> Result<Json<Vec<Verdict>>, ApiError> {
    request
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    Ok(Json(state.engine.inspect(&request.text)))
}
