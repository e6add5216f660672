//! clinyx-common — Shared identifiers, entities and errors used across all Clinyx crates.

pub mod error;
pub mod ids;
pub mod entities;

// Re-export commonly used types
pub use ids::{DiseaseId, LabTestId, PostMortemTestId, SignId, SymptomId};
pub use entities::{DiseaseProfile, LabTest, ObservationSet, PostMortemTest, Sign, Symptom};
