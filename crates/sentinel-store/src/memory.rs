//! In-memory storage provider for tests and single-process deployments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use sentinel_core::{ApiKey, AuditEntry, NewAuditEntry, Project};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::store::{ApiKeyStore, AuditStore, ProjectStore};

/// In-memory implementation of all three storage traits.
///
/// Backed by `tokio::sync::RwLock`, so any number of pipeline tasks can
/// read concurrently while writes serialize per collection. An
/// availability toggle lets tests exercise the backend-down paths.
#[derive(Default)]
pub struct MemoryStore {
    keys: RwLock<HashMap<Uuid, ApiKey>>,
    projects: RwLock<HashMap<Uuid, Project>>,
    entries: RwLock<Vec<AuditEntry>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an issued key. This is the management layer's write path;
    /// the pipeline itself never creates keys.
    pub async fn add_key(&self, key: ApiKey) {
        self.keys.write().await.insert(key.id, key);
    }

    /// Register a project.
    pub async fn add_project(&self, project: Project) {
        self.projects.write().await.insert(project.id, project);
    }

    /// Simulate an unreachable backend: while set, every operation
    /// returns [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ApiKeyStore for MemoryStore {
    async fn find_by_secret(&self, secret: &str) -> Result<Option<ApiKey>> {
        self.check_available()?;
        let keys = self.keys.read().await;
        Ok(keys.values().find(|k| k.secret == secret).cloned())
    }

    async fn touch_last_used(&self, key_id: Uuid) -> Result<()> {
        self.check_available()?;
        let mut keys = self.keys.write().await;
        if let Some(key) = keys.get_mut(&key_id) {
            key.last_used = Some(Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn get(&self, project_id: Uuid) -> Result<Option<Project>> {
        self.check_available()?;
        Ok(self.projects.read().await.get(&project_id).cloned())
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn append(&self, draft: NewAuditEntry) -> Result<AuditEntry> {
        self.check_available()?;
        let entry = AuditEntry::assign(draft);
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<AuditEntry>> {
        self.check_available()?;
        let entries = self.entries.read().await;

        let mut ordered: Vec<AuditEntry> = entries.clone();
        ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(ordered.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self) -> Result<usize> {
        self.check_available()?;
        Ok(self.entries.read().await.len())
    }
}
