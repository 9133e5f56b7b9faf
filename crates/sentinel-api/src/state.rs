//! Shared application state.

use std::sync::Arc;

use sentinel_detectors::{DetectorRegistry, InspectionEngine};
use sentinel_store::{ApiKeyStore, AuditStore, MemoryStore, ProjectStore};

use crate::config::AppConfig;
use crate::pipeline::GuardPipeline;
use crate::session::SessionKeys;

/// Everything the handlers need, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<GuardPipeline>,
    pub engine: Arc<InspectionEngine>,
    pub audit: Arc<dyn AuditStore>,
    pub session_keys: Arc<SessionKeys>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state over explicit storage backends.
    pub fn with_stores(
        config: AppConfig,
        keys: Arc<dyn ApiKeyStore>,
        projects: Arc<dyn ProjectStore>,
        audit: Arc<dyn AuditStore>,
    ) -> Self {
        let engine = Arc::new(InspectionEngine::new(DetectorRegistry::reference_set()));
        let session_keys = Arc::new(SessionKeys::new(config.auth.session_secret.clone()));

        let pipeline = Arc::new(GuardPipeline::new(
            keys,
            projects,
            Arc::clone(&audit),
            Arc::clone(&engine),
            config.detection.mode,
            config.audit.retention,
            config.audit.region.clone(),
        ));

        Self {
            pipeline,
            engine,
            audit,
            session_keys,
            config: Arc::new(config),
        }
    }

    /// Build state backed by a shared in-memory store.
    pub fn in_memory(config: AppConfig, store: Arc<MemoryStore>) -> Self {
        Self::with_stores(config, store.clone(), store.clone(), store)
    }
}
