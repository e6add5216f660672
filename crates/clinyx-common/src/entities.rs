//! Catalog entity types read by the suggestion engine.
//! These mirror the reference tables of the clinical record system; the
//! engine never mutates them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{DiseaseId, LabTestId, PostMortemTestId, SignId, SymptomId};

// ---------------------------------------------------------------------------
// Reference catalogs
// ---------------------------------------------------------------------------

/// Subjective, patient-reported indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: SymptomId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Objective, clinician-observed indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sign {
    pub id: SignId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabTest {
    pub id: LabTestId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMortemTest {
    pub id: PostMortemTestId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Disease profile
// ---------------------------------------------------------------------------

/// A disease together with its catalogued diagnostic features.
///
/// Only `symptom_ids` and `sign_ids` take part in scoring. Lab and
/// post-mortem tests are carried along so a suggestion can point at the
/// examinations that would confirm it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseProfile {
    pub id: DiseaseId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub symptom_ids: BTreeSet<SymptomId>,
    #[serde(default)]
    pub sign_ids: BTreeSet<SignId>,
    #[serde(default)]
    pub lab_test_ids: BTreeSet<LabTestId>,
    #[serde(default)]
    pub post_mortem_test_ids: BTreeSet<PostMortemTestId>,
}

impl DiseaseProfile {
    pub fn new(id: DiseaseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            symptom_ids: BTreeSet::new(),
            sign_ids: BTreeSet::new(),
            lab_test_ids: BTreeSet::new(),
            post_mortem_test_ids: BTreeSet::new(),
        }
    }

    /// Total number of scorable features: symptoms plus signs.
    pub fn profile_size(&self) -> usize {
        self.symptom_ids.len() + self.sign_ids.len()
    }

    /// A profile with nothing to match against.
    pub fn is_empty_profile(&self) -> bool {
        self.symptom_ids.is_empty() && self.sign_ids.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Observation (query input)
// ---------------------------------------------------------------------------

/// The symptoms and signs a physician marked as present in one encounter.
///
/// The two categories live in separately typed sets and are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationSet {
    #[serde(default)]
    pub symptoms: BTreeSet<SymptomId>,
    #[serde(default)]
    pub signs: BTreeSet<SignId>,
}

impl ObservationSet {
    pub fn new<S, G>(symptoms: S, signs: G) -> Self
    where
        S: IntoIterator<Item = SymptomId>,
        G: IntoIterator<Item = SignId>,
    {
        Self {
            symptoms: symptoms.into_iter().collect(),
            signs: signs.into_iter().collect(),
        }
    }

    pub fn with_symptom(mut self, id: SymptomId) -> Self {
        self.symptoms.insert(id);
        self
    }

    pub fn with_sign(mut self, id: SignId) -> Self {
        self.signs.insert(id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty() && self.signs.is_empty()
    }

    /// Number of observed items across both categories.
    pub fn len(&self) -> usize {
        self.symptoms.len() + self.signs.len()
    }
}
