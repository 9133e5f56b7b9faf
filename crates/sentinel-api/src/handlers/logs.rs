//! Session-guarded audit listing.

use axum::extract::{Query, State};
use axum::{Extension, Json};
use sentinel_core::AuditEntry;
use tracing::debug;

use crate::error::ApiError;
use crate::middleware::SessionUser;
use crate::models::request::LogsQuery;
use crate::state::AppState;

/// Page size used when the caller does not ask for one.
const DEFAULT_PAGE_SIZE: usize = 100;

/// GET /v1/logs - audit entries, newest first.
///
/// `limit` is clamped to `audit.max_page_size` regardless of what the
/// caller requests. Consumed by the reporting layer; entries are never
/// mutated or deleted through this API.
pub async fn list_logs(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<Vec<AuditEntry>>, ApiError> {
    let offset = query.offset.unwrap_or(0);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(state.config.audit.max_page_size);

    debug!(user = %session.user, offset, limit, "listing audit entries");

    let entries = state.audit.list(offset, limit).await?;
    Ok(Json(entries))
}
