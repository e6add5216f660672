//! Shared test fixtures for Clinyx crates.
//!
//! Builders take raw integer ids so tests read like the tables they model.

use clinyx_common::{
    DiseaseId, DiseaseProfile, LabTestId, ObservationSet, SignId, SymptomId,
};

pub mod strategies;

/// A disease profile with the given symptom and sign ids.
pub fn disease(id: u32, name: &str, symptoms: &[u32], signs: &[u32]) -> DiseaseProfile {
    let mut d = DiseaseProfile::new(DiseaseId::new(id), name);
    d.symptom_ids = symptoms.iter().copied().map(SymptomId::new).collect();
    d.sign_ids = signs.iter().copied().map(SignId::new).collect();
    d
}

/// An observation with the given symptom and sign ids.
pub fn observation(symptoms: &[u32], signs: &[u32]) -> ObservationSet {
    ObservationSet::new(
        symptoms.iter().copied().map(SymptomId::new),
        signs.iter().copied().map(SignId::new),
    )
}

/// Incrementally built disease catalog with sequential ids.
#[derive(Debug, Default)]
pub struct CatalogFixture {
    diseases: Vec<DiseaseProfile>,
}

impl CatalogFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disease(mut self, name: &str, symptoms: &[u32], signs: &[u32]) -> Self {
        let id = self.diseases.len() as u32 + 1;
        self.diseases.push(disease(id, name, symptoms, signs));
        self
    }

    /// Attach lab tests to the most recently added disease.
    pub fn confirmed_by(mut self, lab_tests: &[u32]) -> Self {
        if let Some(last) = self.diseases.last_mut() {
            last.lab_test_ids.extend(lab_tests.iter().copied().map(LabTestId::new));
        }
        self
    }

    pub fn build(self) -> Vec<DiseaseProfile> {
        self.diseases
    }
}

/// Small respiratory/metabolic catalog used across crates.
///
/// | id | disease      | symptoms   | signs |
/// |----|--------------|------------|-------|
/// | 1  | Gripe        | 1 2 3 4    | 1 2   |
/// | 2  | COVID-19     | 5 6 2 4    | 1 3   |
/// | 3  | Diabetes     | 7 2 8 9    | 4 5   |
/// | 4  | Sin perfil   |            |       |
pub fn sample_catalog() -> Vec<DiseaseProfile> {
    CatalogFixture::new()
        .disease("Gripe", &[1, 2, 3, 4], &[1, 2])
        .confirmed_by(&[1, 2])
        .disease("COVID-19", &[5, 6, 2, 4], &[1, 3])
        .confirmed_by(&[2])
        .disease("Diabetes", &[7, 2, 8, 9], &[4, 5])
        .disease("Sin perfil", &[], &[])
        .build()
}
