//! Inverted index over a disease catalog.
//!
//! Maps every symptom and sign id to the diseases that list it, so a query
//! only touches diseases sharing at least one feature with the observation
//! instead of rescanning the whole catalog.

use std::collections::HashMap;
use std::sync::Arc;

use clinyx_common::{DiseaseProfile, ObservationSet, SignId, SymptomId};
use tracing::debug;

use crate::scorer::{suggestion_from_counts, suggestion_order, RankedSuggestion};

/// Immutable catalog snapshot plus its postings lists.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    diseases: Arc<[DiseaseProfile]>,
    by_symptom: HashMap<SymptomId, Vec<usize>>,
    by_sign: HashMap<SignId, Vec<usize>>,
}

impl CatalogIndex {
    pub fn build(diseases: impl Into<Arc<[DiseaseProfile]>>) -> Self {
        let diseases = diseases.into();
        let mut by_symptom: HashMap<SymptomId, Vec<usize>> = HashMap::new();
        let mut by_sign: HashMap<SignId, Vec<usize>> = HashMap::new();

        for (pos, disease) in diseases.iter().enumerate() {
            for id in &disease.symptom_ids {
                by_symptom.entry(*id).or_default().push(pos);
            }
            for id in &disease.sign_ids {
                by_sign.entry(*id).or_default().push(pos);
            }
        }

        debug!(
            diseases = diseases.len(),
            symptom_keys = by_symptom.len(),
            sign_keys = by_sign.len(),
            "built catalog index"
        );

        Self { diseases, by_symptom, by_sign }
    }

    /// The indexed catalog, in its original order.
    pub fn diseases(&self) -> &[DiseaseProfile] {
        &self.diseases
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    /// Positions of the diseases listing `id` as a symptom.
    pub fn diseases_with_symptom(&self, id: SymptomId) -> &[usize] {
        self.by_symptom.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Positions of the diseases listing `id` as a sign.
    pub fn diseases_with_sign(&self, id: SignId) -> &[usize] {
        self.by_sign.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Same output as [`crate::rank`] over [`Self::diseases`].
    pub fn rank(&self, observation: &ObservationSet) -> Vec<RankedSuggestion<'_>> {
        let mut counts: HashMap<usize, usize> = HashMap::new();

        for id in &observation.symptoms {
            for &pos in self.diseases_with_symptom(*id) {
                *counts.entry(pos).or_insert(0) += 1;
            }
        }
        for id in &observation.signs {
            for &pos in self.diseases_with_sign(*id) {
                *counts.entry(pos).or_insert(0) += 1;
            }
        }

        let candidates = counts.len();
        let mut suggestions: Vec<RankedSuggestion<'_>> = counts
            .into_iter()
            .filter_map(|(pos, matches)| suggestion_from_counts(&self.diseases[pos], matches))
            .collect();

        suggestions.sort_by(suggestion_order);

        debug!(
            symptoms = observation.symptoms.len(),
            signs = observation.signs.len(),
            candidates,
            suggested = suggestions.len(),
            "ranked catalog via index"
        );

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinyx_test_utils::{disease, observation};

    #[test]
    fn test_postings_are_per_category() {
        let index = CatalogIndex::build(vec![
            disease(1, "A", &[3], &[]),
            disease(2, "B", &[], &[3]),
            disease(3, "C", &[3], &[3]),
        ]);
        assert_eq!(index.diseases_with_symptom(SymptomId::new(3)), &[0, 2]);
        assert_eq!(index.diseases_with_sign(SignId::new(3)), &[1, 2]);
        assert!(index.diseases_with_symptom(SymptomId::new(99)).is_empty());
    }

    #[test]
    fn test_empty_profiles_never_indexed() {
        let index = CatalogIndex::build(vec![disease(1, "Empty", &[], &[])]);
        assert_eq!(index.len(), 1);
        assert!(index.rank(&observation(&[1, 2], &[1, 2])).is_empty());
    }

    #[test]
    fn test_index_matches_linear_scan() {
        let catalog = vec![
            disease(1, "Gripe", &[1, 2, 3, 4, 5], &[1, 2]),
            disease(2, "COVID-19", &[6, 7, 3, 4], &[1, 3]),
            disease(3, "Diabetes", &[8, 3, 9, 10], &[4, 5]),
            disease(4, "Hipertensión", &[1, 11, 12, 8], &[6, 7]),
        ];
        let obs = observation(&[3, 4, 1], &[1]);
        let index = CatalogIndex::build(catalog.clone());
        let linear = crate::rank_observation(&obs, &catalog);
        let indexed = index.rank(&obs);
        assert_eq!(linear, indexed);
    }
}
