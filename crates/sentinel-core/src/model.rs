//! Persistent domain entities: API keys, projects, and audit entries.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of random alphanumeric characters in a generated key secret.
const SECRET_LEN: usize = 43;

/// Prefix identifying Prompt Sentinel key secrets in logs and dashboards.
const SECRET_PREFIX: &str = "sk_";

/// An opaque bearer credential authorizing ingestion, optionally linked
/// to a [`Project`].
///
/// The secret value is generated server-side on issuance and is unique
/// across all keys. The only field that ever changes after issuance is
/// `last_used`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: Uuid,
    /// Display name chosen by the operator.
    pub name: String,
    /// The opaque bearer secret. Lookup is by exact match on this value.
    pub secret: String,
    /// Optional owning project. `None` means the key resolves to the
    /// default context.
    pub project_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    /// Set on every successful authenticated ingestion, best effort.
    pub last_used: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// Issue a new key with a freshly generated `sk_`-prefixed secret.
    pub fn issue(name: impl Into<String>, project_id: Option<Uuid>) -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SECRET_LEN)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            secret: format!("{SECRET_PREFIX}{suffix}"),
            project_id,
            created_at: Utc::now(),
            last_used: None,
        }
    }
}

/// A named tenant context. Read-only from the inspection pipeline's
/// perspective; creation and updates belong to the management layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    /// Display name, recorded on audit entries.
    pub name: String,
    /// External-facing short code, unique across projects.
    pub code: String,
    /// Name of the policy governing requests made under this project.
    pub policy: String,
    /// Opaque operator-supplied metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    /// Whether the project's demo surface is publicly routable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    /// Public routing slug for the demo surface, when exposed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_slug: Option<String>,
    /// Downstream model identifiers this project may route to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_models: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a project with the required fields; optional fields start
    /// unset and are filled in by the management layer.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        policy: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            code: code.into(),
            policy: policy.into(),
            metadata: None,
            is_public: None,
            public_slug: None,
            allowed_models: None,
            created_at: Utc::now(),
        }
    }
}

/// An audit entry before the store has assigned its identity.
///
/// The pipeline builds one of these per inspected request; the audit
/// store assigns the identifier and creation timestamp when it persists
/// the record.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    /// Display name of the resolved project.
    pub project: String,
    /// Category labels the inspection flagged; may be empty.
    pub threats_detected: Vec<String>,
    /// The inspected content, verbatim or redacted per configuration.
    pub content: String,
    /// Name of the resolved policy.
    pub policy: String,
    /// Caller-supplied or generated request identifier.
    pub request_id: String,
    /// Measured pipeline latency in milliseconds.
    pub latency_ms: u64,
    /// Origin region label for this deployment.
    pub region: String,
    pub metadata: Option<String>,
}

/// The immutable persisted record of one inspected request.
///
/// Once written, an entry is never mutated or deleted by the inspection
/// service; listing is ordered by `timestamp`, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub project: String,
    pub threats_detected: Vec<String>,
    pub content: String,
    pub policy: String,
    pub request_id: String,
    #[serde(rename = "latency")]
    pub latency_ms: u64,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

impl AuditEntry {
    /// Assign identity to a draft entry, fixing its creation timestamp.
    pub fn assign(draft: NewAuditEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            project: draft.project,
            threats_detected: draft.threats_detected,
            content: draft.content,
            policy: draft.policy,
            request_id: draft.request_id,
            latency_ms: draft.latency_ms,
            region: draft.region,
            metadata: draft.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_keys_are_unique_and_prefixed() {
        let a = ApiKey::issue("ci", None);
        let b = ApiKey::issue("ci", None);
        assert!(a.secret.starts_with("sk_"));
        assert_eq!(a.secret.len(), SECRET_PREFIX.len() + SECRET_LEN);
        assert_ne!(a.secret, b.secret);
        assert!(a.last_used.is_none());
    }

    #[test]
    fn test_issue_links_project() {
        let project = Project::new("Website", "proj_web", "Strict");
        let key = ApiKey::issue("web-backend", Some(project.id));
        assert_eq!(key.project_id, Some(project.id));
    }

    #[test]
    fn test_assign_sets_identity() {
        let draft = NewAuditEntry {
            project: "Website".to_string(),
            threats_detected: vec!["Data Leakage".to_string()],
            content: "hello".to_string(),
            policy: "Strict".to_string(),
            request_id: "req_1".to_string(),
            latency_ms: 12,
            region: "us-east-1".to_string(),
            metadata: None,
        };

        let entry = AuditEntry::assign(draft);
        assert!(!entry.id.is_nil());
        assert_eq!(entry.project, "Website");
        assert_eq!(entry.threats_detected, vec!["Data Leakage"]);
    }

    #[test]
    fn test_audit_entry_wire_format() {
        let entry = AuditEntry::assign(NewAuditEntry {
            project: "Website".to_string(),
            threats_detected: vec![],
            content: "hi".to_string(),
            policy: "default".to_string(),
            request_id: "req_2".to_string(),
            latency_ms: 40,
            region: "eu-west-1".to_string(),
            metadata: None,
        });

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"latency\":40"));
        assert!(json.contains("\"threats_detected\":[]"));
        assert!(!json.contains("\"metadata\""));
    }
}
