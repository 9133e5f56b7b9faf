//! The ingestion pipeline.
//!
//! One request flows authenticate → resolve context → extract content →
//! inspect → record → stamp key usage. Authentication failures are
//! terminal and leave no persisted state; a failed audit write is fatal
//! for the request and reported distinctly; the usage stamp is advisory
//! and runs detached from the response.

use std::sync::Arc;
use std::time::Instant;

use sentinel_core::{AuditEntry, NewAuditEntry};
use sentinel_detectors::{detected_categories, InspectionEngine};
use sentinel_store::{ApiKeyStore, AuditStore, ProjectStore};
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{ContentRetention, DetectionMode};
use crate::error::ApiError;
use crate::models::request::{ChatMessage, GuardRequest};

/// Context label recorded when a key carries no project linkage.
const DEFAULT_CONTEXT: &str = "default";

/// Orchestrates one inspected request end to end.
pub struct GuardPipeline {
    keys: Arc<dyn ApiKeyStore>,
    projects: Arc<dyn ProjectStore>,
    audit: Arc<dyn AuditStore>,
    engine: Arc<InspectionEngine>,
    detection_mode: DetectionMode,
    retention: ContentRetention,
    region: String,
}

impl GuardPipeline {
    pub fn new(
        keys: Arc<dyn ApiKeyStore>,
        projects: Arc<dyn ProjectStore>,
        audit: Arc<dyn AuditStore>,
        engine: Arc<InspectionEngine>,
        detection_mode: DetectionMode,
        retention: ContentRetention,
        region: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            projects,
            audit,
            engine,
            detection_mode,
            retention,
            region: region.into(),
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// `authorization` is the raw `Authorization` header value, if any.
    pub async fn ingest(
        &self,
        authorization: Option<&str>,
        request: GuardRequest,
    ) -> Result<AuditEntry, ApiError> {
        let started = Instant::now();

        // Authenticate. A miss here must leave no trace in the store.
        let secret = bearer_secret(authorization)?;
        let key = self
            .keys
            .find_by_secret(secret)
            .await?
            .ok_or_else(ApiError::unknown_credential)?;

        let (project, policy) = self.resolve_context(&key).await?;

        let content = select_inspection_content(&request.messages);

        let threats_detected = match self.detection_mode {
            DetectionMode::Standard => detected_categories(&self.engine.inspect(&content)),
            // Maximal-alert demo mode: every registered category fires.
            DetectionMode::FlagAll => self
                .engine
                .categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
        };

        metrics::counter!("guard_requests_total").increment(1);
        metrics::counter!("guard_threats_total").increment(threats_detected.len() as u64);

        let request_id = request
            .request_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("req_{}", Uuid::new_v4().simple()));

        let entry = self
            .audit
            .append(NewAuditEntry {
                project,
                threats_detected,
                content: self.retained_content(&content),
                policy,
                request_id,
                latency_ms: started.elapsed().as_millis() as u64,
                region: self.region.clone(),
                metadata: request.metadata,
            })
            .await?;

        info!(
            request_id = %entry.request_id,
            project = %entry.project,
            threats = entry.threats_detected.len(),
            latency_ms = entry.latency_ms,
            "request inspected and recorded"
        );

        // Stamp key usage without holding up the response. Best effort:
        // a failure is logged and swallowed.
        let keys = Arc::clone(&self.keys);
        let key_id = key.id;
        tokio::spawn(async move {
            if let Err(err) = keys.touch_last_used(key_id).await {
                warn!(%err, "failed to stamp API key usage");
            }
        });

        Ok(entry)
    }

    /// Resolve the (project display name, policy name) pair governing a
    /// key. Keys without a resolvable project get the default label for
    /// both; the fallback is deterministic and never fails.
    async fn resolve_context(
        &self,
        key: &sentinel_core::ApiKey,
    ) -> Result<(String, String), ApiError> {
        if let Some(project_id) = key.project_id {
            if let Some(project) = self.projects.get(project_id).await? {
                return Ok((project.name, project.policy));
            }
        }
        Ok((DEFAULT_CONTEXT.to_string(), DEFAULT_CONTEXT.to_string()))
    }

    fn retained_content(&self, content: &str) -> String {
        match self.retention {
            ContentRetention::Verbatim => content.to_string(),
            ContentRetention::Redacted => {
                format!("sha256:{}", hex::encode(Sha256::digest(content.as_bytes())))
            }
        }
    }
}

/// Extract the raw bearer secret from an `Authorization` header value.
fn bearer_secret(authorization: Option<&str>) -> Result<&str, ApiError> {
    authorization
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|secret| !secret.is_empty())
        .ok_or_else(ApiError::missing_credential)
}

/// Select the text to inspect from the submitted messages.
///
/// Policy: the first message with role "user" and non-empty content; if
/// none exists, the first message overall; empty string for an empty
/// list. Deterministic, because this choice decides what gets labeled
/// and stored.
pub fn select_inspection_content(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .find(|m| m.role == "user" && !m.content.is_empty())
        .or_else(|| messages.first())
        .map(|m| m.content.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::ChatMessage;
    use sentinel_core::{ApiKey, Project};
    use sentinel_detectors::DetectorRegistry;
    use sentinel_store::MemoryStore;

    fn pipeline_with(
        store: Arc<MemoryStore>,
        detection_mode: DetectionMode,
        retention: ContentRetention,
    ) -> GuardPipeline {
        GuardPipeline::new(
            store.clone(),
            store.clone(),
            store,
            Arc::new(InspectionEngine::new(DetectorRegistry::reference_set())),
            detection_mode,
            retention,
            "us-east-1",
        )
    }

    fn guard_request(messages: Vec<ChatMessage>) -> GuardRequest {
        GuardRequest {
            messages,
            request_id: None,
            metadata: None,
        }
    }

    async fn seeded_key(store: &MemoryStore, project_id: Option<uuid::Uuid>) -> String {
        let key = ApiKey::issue("test", project_id);
        let secret = key.secret.clone();
        store.add_key(key).await;
        secret
    }

    #[tokio::test]
    async fn test_missing_and_malformed_credentials_rejected() {
        let store = Arc::new(MemoryStore::new());
        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::Standard,
            ContentRetention::Verbatim,
        );

        for header in [None, Some("Basic abc"), Some("Bearer "), Some("Bearer")] {
            let result = pipeline.ingest(header, guard_request(vec![])).await;
            assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
        }
        assert_eq!(sentinel_store::AuditStore::count(store.as_ref()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_credential_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::Standard,
            ContentRetention::Verbatim,
        );

        let result = pipeline
            .ingest(
                Some("Bearer sk_unknown"),
                guard_request(vec![ChatMessage::new("user", "hi")]),
            )
            .await;

        assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
        assert_eq!(sentinel_store::AuditStore::count(store.as_ref()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_linked_project_context_recorded() {
        let store = Arc::new(MemoryStore::new());
        let project = Project::new("First Project", "project-2481057316", "Default Policy");
        let project_id = project.id;
        store.add_project(project).await;
        let secret = seeded_key(&store, Some(project_id)).await;

        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::Standard,
            ContentRetention::Verbatim,
        );
        let entry = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "hello")]),
            )
            .await
            .unwrap();

        assert_eq!(entry.project, "First Project");
        assert_eq!(entry.policy, "Default Policy");
        assert_eq!(entry.region, "us-east-1");
    }

    #[tokio::test]
    async fn test_unlinked_key_uses_default_context() {
        let store = Arc::new(MemoryStore::new());
        let secret = seeded_key(&store, None).await;

        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::Standard,
            ContentRetention::Verbatim,
        );
        let entry = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "hello")]),
            )
            .await
            .unwrap();

        assert_eq!(entry.project, "default");
        assert_eq!(entry.policy, "default");
    }

    #[tokio::test]
    async fn test_dangling_project_reference_falls_back() {
        let store = Arc::new(MemoryStore::new());
        let secret = seeded_key(&store, Some(uuid::Uuid::new_v4())).await;

        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::Standard,
            ContentRetention::Verbatim,
        );
        let entry = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "hello")]),
            )
            .await
            .unwrap();

        assert_eq!(entry.project, "default");
        assert_eq!(entry.policy, "default");
    }

    #[test]
    fn test_content_selection_policy() {
        // No user message: fall back to the first message.
        let assistant_only = vec![ChatMessage::new("assistant", "hi")];
        assert_eq!(select_inspection_content(&assistant_only), "hi");

        // Skip empty user messages.
        let with_empty = vec![
            ChatMessage::new("user", ""),
            ChatMessage::new("user", "secret"),
        ];
        assert_eq!(select_inspection_content(&with_empty), "secret");

        // Empty list: empty content, no failure.
        assert_eq!(select_inspection_content(&[]), "");

        // First non-empty user message wins over earlier assistants.
        let mixed = vec![
            ChatMessage::new("assistant", "welcome"),
            ChatMessage::new("user", "question"),
            ChatMessage::new("user", "followup"),
        ];
        assert_eq!(select_inspection_content(&mixed), "question");
    }

    #[tokio::test]
    async fn test_standard_mode_detects_only_triggered_categories() {
        let store = Arc::new(MemoryStore::new());
        let secret = seeded_key(&store, None).await;
        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::Standard,
            ContentRetention::Verbatim,
        );

        let entry = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "card 374245455400128")]),
            )
            .await
            .unwrap();
        assert_eq!(entry.threats_detected, vec!["Data Leakage"]);

        let clean = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "what time is it")]),
            )
            .await
            .unwrap();
        assert!(clean.threats_detected.is_empty());
    }

    #[tokio::test]
    async fn test_flag_all_mode_reports_every_category() {
        let store = Arc::new(MemoryStore::new());
        let secret = seeded_key(&store, None).await;
        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::FlagAll,
            ContentRetention::Verbatim,
        );

        let entry = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "completely benign")]),
            )
            .await
            .unwrap();

        assert_eq!(
            entry.threats_detected,
            vec![
                "Prompt Attack",
                "Data Leakage",
                "Content Violation",
                "Unknown Links"
            ]
        );
    }

    #[tokio::test]
    async fn test_redacted_retention_stores_digest() {
        let store = Arc::new(MemoryStore::new());
        let secret = seeded_key(&store, None).await;
        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::Standard,
            ContentRetention::Redacted,
        );

        let entry = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "sensitive text")]),
            )
            .await
            .unwrap();

        assert!(entry.content.starts_with("sha256:"));
        assert_eq!(entry.content.len(), "sha256:".len() + 64);
        assert!(!entry.content.contains("sensitive"));

        // Digest is stable for identical content.
        let again = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "sensitive text")]),
            )
            .await
            .unwrap();
        assert_eq!(again.content, entry.content);
    }

    #[tokio::test]
    async fn test_request_id_passthrough_and_generation() {
        let store = Arc::new(MemoryStore::new());
        let secret = seeded_key(&store, None).await;
        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::Standard,
            ContentRetention::Verbatim,
        );

        let supplied = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                GuardRequest {
                    messages: vec![ChatMessage::new("user", "hi")],
                    request_id: Some("req-12345".to_string()),
                    metadata: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(supplied.request_id, "req-12345");

        let generated = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "hi")]),
            )
            .await
            .unwrap();
        assert!(generated.request_id.starts_with("req_"));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_store_error() {
        let store = Arc::new(MemoryStore::new());
        let secret = seeded_key(&store, None).await;
        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::Standard,
            ContentRetention::Verbatim,
        );

        // Backend down: the request fails distinctly from 401 and
        // leaves nothing behind.
        store.set_unavailable(true);
        let result = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "hi")]),
            )
            .await;
        assert!(matches!(result, Err(ApiError::Store(_))));

        store.set_unavailable(false);
        assert_eq!(sentinel_store::AuditStore::count(store.as_ref()).await.unwrap(), 0);
    }

    struct FailingAudit;

    #[async_trait::async_trait]
    impl sentinel_store::AuditStore for FailingAudit {
        async fn append(
            &self,
            _draft: NewAuditEntry,
        ) -> Result<AuditEntry, sentinel_store::StoreError> {
            Err(sentinel_store::StoreError::Unavailable(
                "append rejected".to_string(),
            ))
        }

        async fn list(
            &self,
            _offset: usize,
            _limit: usize,
        ) -> Result<Vec<AuditEntry>, sentinel_store::StoreError> {
            Ok(vec![])
        }

        async fn count(&self) -> Result<usize, sentinel_store::StoreError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_append_failure_is_store_error() {
        let store = Arc::new(MemoryStore::new());
        let secret = seeded_key(&store, None).await;

        // Authentication succeeds against the healthy key store, the
        // recording step alone fails.
        let pipeline = GuardPipeline::new(
            store.clone(),
            store.clone(),
            Arc::new(FailingAudit),
            Arc::new(InspectionEngine::new(DetectorRegistry::reference_set())),
            DetectionMode::Standard,
            ContentRetention::Verbatim,
            "us-east-1",
        );

        let result = pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "hi")]),
            )
            .await;
        assert!(matches!(result, Err(ApiError::Store(_))));
    }

    #[tokio::test]
    async fn test_key_usage_stamped_after_success() {
        let store = Arc::new(MemoryStore::new());
        let secret = seeded_key(&store, None).await;
        let pipeline = pipeline_with(
            store.clone(),
            DetectionMode::Standard,
            ContentRetention::Verbatim,
        );

        pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "hi")]),
            )
            .await
            .unwrap();

        // The stamp runs on a detached task; give it a moment.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let key = sentinel_store::ApiKeyStore::find_by_secret(store.as_ref(), &secret)
            .await
            .unwrap()
            .unwrap();
        let first = key.last_used.expect("last_used should be stamped");

        pipeline
            .ingest(
                Some(&format!("Bearer {secret}")),
                guard_request(vec![ChatMessage::new("user", "again")]),
            )
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let key = sentinel_store::ApiKeyStore::find_by_secret(store.as_ref(), &secret)
            .await
            .unwrap()
            .unwrap();
        assert!(key.last_used.expect("still stamped") >= first);
    }
}
