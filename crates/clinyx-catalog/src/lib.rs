//! clinyx-catalog — Knowledge base loading and catalog snapshots.
//!
//! Turns a name-based knowledge base document (TOML or JSON) into a
//! [`Catalog`]: typed ids per category, resolved disease profiles, and the
//! lookups the inference boundary needs. Snapshots are immutable; a reload
//! builds a new one.

pub mod error;
pub mod knowledge_base;
pub mod catalog;
pub mod provider;

pub use catalog::{BuildOptions, Catalog, CatalogStats};
pub use error::{CatalogError, Result};
pub use knowledge_base::{CatalogEntry, DiseaseEntry, KnowledgeBase};
pub use provider::{CatalogProvider, FileCatalogProvider, SeedCatalogProvider};
