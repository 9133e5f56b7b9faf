//! Outbound payloads.

use chrono::{DateTime, Utc};
use sentinel_core::AuditEntry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Successful response from `POST /v1/guard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardResponse {
    /// Identifier of the recorded audit entry.
    pub id: Uuid,
    /// Creation timestamp of the audit entry.
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
    /// Category labels the inspection flagged; may be empty.
    pub threats_detected: Vec<String>,
}

impl From<&AuditEntry> for GuardResponse {
    fn from(entry: &AuditEntry) -> Self {
        Self {
            id: entry.id,
            timestamp: entry.timestamp,
            request_id: entry.request_id.clone(),
            threats_detected: entry.threats_detected.clone(),
        }
    }
}
