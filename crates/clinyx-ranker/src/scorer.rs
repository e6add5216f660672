//! Profile-coverage scoring and suggestion ordering.
//!
//! score(d, o) = round(100 × (|o.symptoms ∩ d.symptoms| + |o.signs ∩ d.signs|) / (|d.symptoms| + |d.signs|))
//!
//! Diseases with an empty profile or no overlap are left out of the output.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use clinyx_common::{DiseaseProfile, ObservationSet, SignId, SymptomId};
use serde::Serialize;
use tracing::debug;

use crate::score::Score;

/// One row of the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedSuggestion<'a> {
    pub disease: &'a DiseaseProfile,
    pub score: Score,
    /// Observed items present in the profile (symptoms + signs).
    pub matches: usize,
    /// Catalogued symptoms + signs of the disease.
    pub profile_size: usize,
}

/// Total order over suggestions:
/// score desc, then match count desc, then disease name asc, then disease id asc.
pub fn suggestion_order(a: &RankedSuggestion<'_>, b: &RankedSuggestion<'_>) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.matches.cmp(&a.matches))
        .then_with(|| a.disease.name.cmp(&b.disease.name))
        .then_with(|| a.disease.id.cmp(&b.disease.id))
}

fn overlap<T: Ord>(left: &BTreeSet<T>, right: &BTreeSet<T>) -> usize {
    let (small, large) = if left.len() <= right.len() { (left, right) } else { (right, left) };
    small.iter().filter(|id| large.contains(id)).count()
}

/// Score a single disease against an observation.
///
/// Returns `None` for an empty profile or zero overlap.
pub(crate) fn score_disease<'a>(
    observed_symptoms: &BTreeSet<SymptomId>,
    observed_signs: &BTreeSet<SignId>,
    disease: &'a DiseaseProfile,
) -> Option<RankedSuggestion<'a>> {
    let profile_size = disease.profile_size();
    if profile_size == 0 {
        return None;
    }

    let matches = overlap(observed_symptoms, &disease.symptom_ids)
        + overlap(observed_signs, &disease.sign_ids);
    if matches == 0 {
        return None;
    }

    suggestion_from_counts(disease, matches)
}

/// Build a suggestion from a precomputed match count.
pub(crate) fn suggestion_from_counts(
    disease: &DiseaseProfile,
    matches: usize,
) -> Option<RankedSuggestion<'_>> {
    let profile_size = disease.profile_size();
    let score = Score::from_ratio(matches, profile_size)?;
    Some(RankedSuggestion { disease, score, matches, profile_size })
}

/// Rank every disease in `diseases` against the observed symptoms and signs.
///
/// Never fails: an empty observation or catalog yields an empty list.
pub fn rank<'a, I>(
    observed_symptoms: &BTreeSet<SymptomId>,
    observed_signs: &BTreeSet<SignId>,
    diseases: I,
) -> Vec<RankedSuggestion<'a>>
where
    I: IntoIterator<Item = &'a DiseaseProfile>,
{
    let mut scanned = 0usize;
    let mut suggestions: Vec<RankedSuggestion<'a>> = diseases
        .into_iter()
        .inspect(|_| scanned += 1)
        .filter_map(|d| score_disease(observed_symptoms, observed_signs, d))
        .collect();

    suggestions.sort_by(suggestion_order);

    debug!(
        symptoms = observed_symptoms.len(),
        signs = observed_signs.len(),
        scanned,
        suggested = suggestions.len(),
        "ranked catalog"
    );

    suggestions
}

/// [`rank`] taking both id sets from an [`ObservationSet`].
pub fn rank_observation<'a, I>(observation: &ObservationSet, diseases: I) -> Vec<RankedSuggestion<'a>>
where
    I: IntoIterator<Item = &'a DiseaseProfile>,
{
    rank(&observation.symptoms, &observation.signs, diseases)
}
