//! Storage traits - the abstraction boundary between the pipeline and
//! whatever persists its state.
//!
//! Each method is a single operation against the backend; no multi-step
//! transaction ever spans traits. Key-usage stamping and audit appends
//! are independent writes and may be applied out of order.

use async_trait::async_trait;
use sentinel_core::{ApiKey, AuditEntry, NewAuditEntry, Project};
use uuid::Uuid;

use crate::error::Result;

/// Credential lookup and usage stamping.
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// Resolve a key by exact match on its secret value. `Ok(None)`
    /// means the secret is unknown.
    async fn find_by_secret(&self, secret: &str) -> Result<Option<ApiKey>>;

    /// Stamp the key's last-use time with the current time. Advisory:
    /// callers treat failures as non-fatal, and a key deleted out from
    /// under the stamp is not an error.
    async fn touch_last_used(&self, key_id: Uuid) -> Result<()>;
}

/// Read-only project resolution.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Fetch a project by identifier. `Ok(None)` means no such project.
    async fn get(&self, project_id: Uuid) -> Result<Option<Project>>;
}

/// Append-and-list persistence for audit entries.
///
/// Entries are immutable once appended; no update or delete operation
/// exists on this trait.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Assign identity to the draft and write it durably, all or
    /// nothing. Returns the stored representation.
    async fn append(&self, draft: NewAuditEntry) -> Result<AuditEntry>;

    /// Entries ordered by creation time, newest first. `offset` and
    /// `limit` are applied after ordering; callers are expected to clamp
    /// `limit` before handing it to the store.
    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<AuditEntry>>;

    /// Total number of stored entries.
    async fn count(&self) -> Result<usize>;
}
