//! clinyx-ranker — Diagnosis suggestion engine.
//!
//! Ranks catalogued diseases by the fraction of their symptom/sign profile
//! covered by an observation. Pure and synchronous: no I/O, no shared
//! mutable state, safe to call from any number of threads at once.

pub mod score;
pub mod scorer;
pub mod index;
pub mod engine;

pub use score::Score;
pub use scorer::{rank, rank_observation, suggestion_order, RankedSuggestion};
pub use index::CatalogIndex;
pub use engine::{MatchRanker, Strategy};
