//! Application state for the Suvidhaa server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::analysis::DocumentAnalyzer;
use crate::config::AppConfig;
use crate::error::Result;
use crate::ingestion::IntakePipeline;
use crate::providers::{ChatCompletionsClient, CloudinaryStore, LlmProvider, ObjectStoreProvider};
use crate::storage::RecordStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Record store for every collection
    store: RecordStore,
    /// Remote object store (None when not configured)
    object_store: Option<Arc<dyn ObjectStoreProvider>>,
    /// Upload processing pipeline
    pipeline: IntakePipeline,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create application state with the configured external services
    pub fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing Suvidhaa application state...");

        let store = RecordStore::new(&config.database.path)?;
        tracing::info!("Record store opened at {:?}", config.database.path);

        let llm: Arc<dyn LlmProvider> = Arc::new(ChatCompletionsClient::new(&config.llm)?);
        tracing::info!("LLM provider: {} ({})", llm.name(), llm.model());
        if config.llm.api_key.is_empty() {
            tracing::warn!("LLM_API_KEY is not set, document analysis will fall back to placeholders");
        }

        let object_store: Option<Arc<dyn ObjectStoreProvider>> = match &config.object_store {
            Some(store_config) => {
                let store = CloudinaryStore::new(store_config.clone())?;
                tracing::info!("Object store: {} (cloud '{}')", store.name(), store_config.cloud_name);
                Some(Arc::new(store))
            }
            None => {
                tracing::warn!("Object store not configured, files are kept inline only");
                None
            }
        };

        Ok(Self::with_providers(config, store, llm, object_store))
    }

    /// Create application state from already-built services
    pub fn with_providers(
        config: AppConfig,
        store: RecordStore,
        llm: Arc<dyn LlmProvider>,
        object_store: Option<Arc<dyn ObjectStoreProvider>>,
    ) -> Self {
        let analyzer = DocumentAnalyzer::new(llm, &config.analysis, &config.llm);
        let pipeline = IntakePipeline::new(analyzer, object_store.clone(), store.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                object_store,
                pipeline,
                ready: RwLock::new(true),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the record store
    pub fn store(&self) -> &RecordStore {
        &self.inner.store
    }

    /// Get the object store, if configured
    pub fn object_store(&self) -> Option<&dyn ObjectStoreProvider> {
        self.inner.object_store.as_deref()
    }

    /// Get the upload pipeline
    pub fn pipeline(&self) -> &IntakePipeline {
        &self.inner.pipeline
    }

    /// Check if ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
