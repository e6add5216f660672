//! Trait for catalog snapshot sources.
//!
//! The web layer asks a provider for a fresh snapshot at start-up and on
//! reload, without knowing where the knowledge base lives.

use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::{BuildOptions, Catalog};
use crate::error::Result;
use crate::knowledge_base::KnowledgeBase;

/// Source of consistent, point-in-time catalog snapshots.
///
/// Implementations can use:
/// - a knowledge base file on disk
/// - the bundled seed knowledge base
/// - fixed catalogs (testing)
pub trait CatalogProvider: Send + Sync {
    /// Build a new snapshot. Each call reads the source again.
    fn snapshot(&self) -> Result<Arc<Catalog>>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Loads a TOML or JSON knowledge base from disk.
#[derive(Debug, Clone)]
pub struct FileCatalogProvider {
    path: PathBuf,
    options: BuildOptions,
}

impl FileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>, options: BuildOptions) -> Self {
        Self { path: path.into(), options }
    }
}

impl CatalogProvider for FileCatalogProvider {
    fn snapshot(&self) -> Result<Arc<Catalog>> {
        let kb = KnowledgeBase::load(&self.path)?;
        Ok(Arc::new(Catalog::build(&kb, self.options)?))
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Serves the knowledge base compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct SeedCatalogProvider {
    options: BuildOptions,
}

impl SeedCatalogProvider {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }
}

impl CatalogProvider for SeedCatalogProvider {
    fn snapshot(&self) -> Result<Arc<Catalog>> {
        let kb = KnowledgeBase::seed()?;
        Ok(Arc::new(Catalog::build(&kb, self.options)?))
    }

    fn describe(&self) -> String {
        "built-in seed".to_string()
    }
}
