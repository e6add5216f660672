//! Shared application state for the web server.

use std::sync::{Arc, PoisonError, RwLock};

use clinyx_catalog::{Catalog, CatalogProvider, CatalogStats, Result};
use clinyx_config::InferenceConfig;
use clinyx_ranker::MatchRanker;
use tracing::info;

/// One consistent catalog snapshot and the ranker built over it.
#[derive(Debug)]
pub struct Snapshot {
    pub catalog: Arc<Catalog>,
    pub ranker: MatchRanker,
}

impl Snapshot {
    pub fn new(catalog: Arc<Catalog>, inference: &InferenceConfig) -> Self {
        let ranker = MatchRanker::new(catalog.diseases().to_vec(), inference.strategy);
        Self { catalog, ranker }
    }
}

/// Shared state injected into every Axum handler.
pub struct AppState {
    provider: Arc<dyn CatalogProvider>,
    snapshot: RwLock<Arc<Snapshot>>,
    pub inference: InferenceConfig,
}

impl AppState {
    /// Build the initial snapshot from `provider`.
    pub fn new(provider: Arc<dyn CatalogProvider>, inference: InferenceConfig) -> Result<Self> {
        let catalog = provider.snapshot()?;
        info!(source = %provider.describe(), diseases = catalog.diseases().len(), "catalog loaded");
        let snapshot = Arc::new(Snapshot::new(catalog, &inference));
        Ok(Self { provider, snapshot: RwLock::new(snapshot), inference })
    }

    /// Current snapshot. Handlers hold the `Arc`, never the lock.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Rebuild from the provider and swap the new snapshot in.
    ///
    /// On failure the previous snapshot stays in place.
    pub fn reload(&self) -> Result<CatalogStats> {
        let catalog = self.provider.snapshot()?;
        let stats = catalog.stats();
        let fresh = Arc::new(Snapshot::new(catalog, &self.inference));
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        info!(source = %self.provider.describe(), diseases = stats.diseases, "catalog reloaded");
        Ok(stats)
    }
}

pub type SharedState = Arc<AppState>;
