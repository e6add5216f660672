//! proptest strategies for catalogs and observations.
//!
//! Ids are drawn from a deliberately small range so symptom and sign ids
//! collide numerically and generated observations overlap the catalog.

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

use clinyx_common::{DiseaseId, DiseaseProfile, ObservationSet, SignId, SymptomId};

pub const MAX_FEATURE_ID: u32 = 12;

pub fn symptom_ids(max_len: usize) -> impl Strategy<Value = std::collections::BTreeSet<SymptomId>> {
    btree_set((1..=MAX_FEATURE_ID).prop_map(SymptomId::new), 0..=max_len)
}

pub fn sign_ids(max_len: usize) -> impl Strategy<Value = std::collections::BTreeSet<SignId>> {
    btree_set((1..=MAX_FEATURE_ID).prop_map(SignId::new), 0..=max_len)
}

pub fn observation() -> impl Strategy<Value = ObservationSet> {
    (symptom_ids(8), sign_ids(8)).prop_map(|(symptoms, signs)| ObservationSet { symptoms, signs })
}

/// Catalog of up to `max_diseases` diseases with unique ids and names drawn
/// from a tiny alphabet, so ties on score and name both occur.
pub fn catalog(max_diseases: usize) -> impl Strategy<Value = Vec<DiseaseProfile>> {
    vec((symptom_ids(6), sign_ids(6), 0u8..4), 0..=max_diseases).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (symptom_ids, sign_ids, name))| {
                let mut d = DiseaseProfile::new(
                    DiseaseId::new(i as u32 + 1),
                    format!("disease-{}", (b'a' + name) as char),
                );
                d.symptom_ids = symptom_ids;
                d.sign_ids = sign_ids;
                d
            })
            .collect()
    })
}
