//! Long-lived ranker bound to one catalog snapshot.

use clinyx_common::{DiseaseProfile, ObservationSet};
use serde::{Deserialize, Serialize};

use crate::index::CatalogIndex;
use crate::scorer::{rank_observation, RankedSuggestion};

/// How candidate diseases are found for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Score every disease in the catalog.
    Scan,
    /// Only score diseases reachable through the inverted index.
    #[default]
    Indexed,
}

/// Ranker over an immutable catalog snapshot.
///
/// Cheap to clone (the catalog is shared) and safe to use from many
/// threads; every call is independent.
#[derive(Debug, Clone)]
pub struct MatchRanker {
    index: CatalogIndex,
    strategy: Strategy,
}

impl MatchRanker {
    pub fn new(diseases: Vec<DiseaseProfile>, strategy: Strategy) -> Self {
        Self { index: CatalogIndex::build(diseases), strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn diseases(&self) -> &[DiseaseProfile] {
        self.index.diseases()
    }

    pub fn rank(&self, observation: &ObservationSet) -> Vec<RankedSuggestion<'_>> {
        match self.strategy {
            Strategy::Scan => rank_observation(observation, self.index.diseases()),
            Strategy::Indexed => self.index.rank(observation),
        }
    }
}
