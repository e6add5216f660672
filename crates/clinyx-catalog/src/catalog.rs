//! Immutable catalog snapshot built from a [`KnowledgeBase`].

use std::collections::{BTreeSet, HashMap};

use clinyx_common::{
    DiseaseId, DiseaseProfile, LabTest, LabTestId, ObservationSet, PostMortemTest,
    PostMortemTestId, Sign, SignId, Symptom, SymptomId,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CatalogError, Result};
use crate::knowledge_base::{CatalogEntry, KnowledgeBase};

/// How disease references to unknown names are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Create missing reference entries on first use (get-or-create).
    /// When false, unknown references are dropped with a warning.
    pub auto_create: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { auto_create: true }
    }
}

impl BuildOptions {
    pub fn strict() -> Self {
        Self { auto_create: false }
    }
}

/// Per-category counts of a catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub diseases: usize,
    pub symptoms: usize,
    pub signs: usize,
    pub lab_tests: usize,
    pub post_mortem_tests: usize,
    /// Diseases with no symptoms and no signs; never suggested.
    pub empty_profiles: usize,
    /// Disease references dropped because the name was blank or unknown.
    pub dropped_references: usize,
}

// ── Name interning ─────────────────────────────────────────────────────────

/// Name → sequential id table for one reference category.
struct NameTable<Id> {
    kind: &'static str,
    entries: Vec<CatalogEntry>,
    by_name: HashMap<String, Id>,
}

impl<Id: Copy + From<u32>> NameTable<Id> {
    fn new(kind: &'static str) -> Self {
        Self { kind, entries: Vec::new(), by_name: HashMap::new() }
    }

    /// Insert if absent; the first occurrence of a name keeps its id.
    fn get_or_insert(&mut self, entry: &CatalogEntry) -> Result<Id> {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName { kind: self.kind });
        }
        if let Some(id) = self.by_name.get(name) {
            return Ok(*id);
        }
        let id = Id::from(self.entries.len() as u32 + 1);
        self.entries.push(CatalogEntry {
            name: name.to_string(),
            description: entry.description.clone(),
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Resolve a disease reference, creating or dropping unknown names.
    /// Blank references are dropped in either mode.
    fn resolve(
        &mut self,
        name: &str,
        disease: &str,
        options: BuildOptions,
        dropped: &mut usize,
    ) -> Result<Option<Id>> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            warn!(disease, kind = self.kind, "dropping blank reference");
            *dropped += 1;
            return Ok(None);
        }
        if let Some(id) = self.by_name.get(trimmed) {
            return Ok(Some(*id));
        }
        if options.auto_create {
            return self.get_or_insert(&CatalogEntry::named(trimmed)).map(Some);
        }
        warn!(disease, kind = self.kind, reference = trimmed, "dropping unknown reference");
        *dropped += 1;
        Ok(None)
    }
}

// ── Catalog ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Catalog {
    symptoms: Vec<Symptom>,
    signs: Vec<Sign>,
    lab_tests: Vec<LabTest>,
    post_mortem_tests: Vec<PostMortemTest>,
    diseases: Vec<DiseaseProfile>,
    symptom_names: HashMap<String, SymptomId>,
    sign_names: HashMap<String, SignId>,
    dropped_references: usize,
}

fn slot(raw: u32) -> Option<usize> {
    (raw as usize).checked_sub(1)
}

impl Catalog {
    /// Assign ids in document order and resolve every disease profile.
    ///
    /// Ids are 1-based and per category, so symptom 1 and sign 1 coexist.
    pub fn build(kb: &KnowledgeBase, options: BuildOptions) -> Result<Self> {
        let mut symptoms: NameTable<SymptomId> = NameTable::new("symptom");
        let mut signs: NameTable<SignId> = NameTable::new("sign");
        let mut lab_tests: NameTable<LabTestId> = NameTable::new("lab test");
        let mut post_mortem: NameTable<PostMortemTestId> = NameTable::new("post-mortem test");

        for entry in &kb.symptoms {
            symptoms.get_or_insert(entry)?;
        }
        for entry in &kb.signs {
            signs.get_or_insert(entry)?;
        }
        for entry in &kb.lab_tests {
            lab_tests.get_or_insert(entry)?;
        }
        for entry in &kb.post_mortem_tests {
            post_mortem.get_or_insert(entry)?;
        }

        let mut dropped = 0usize;
        let mut seen_diseases: BTreeSet<String> = BTreeSet::new();
        let mut diseases = Vec::with_capacity(kb.diseases.len());

        for (pos, entry) in kb.diseases.iter().enumerate() {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(CatalogError::EmptyName { kind: "disease" });
            }
            if !seen_diseases.insert(name.to_string()) {
                return Err(CatalogError::DuplicateDisease(name.to_string()));
            }

            let mut profile = DiseaseProfile::new(DiseaseId::new(pos as u32 + 1), name);
            profile.description = entry.description.trim().to_string();

            for s in &entry.symptoms {
                if let Some(id) = symptoms.resolve(s, name, options, &mut dropped)? {
                    profile.symptom_ids.insert(id);
                }
            }
            for s in &entry.signs {
                if let Some(id) = signs.resolve(s, name, options, &mut dropped)? {
                    profile.sign_ids.insert(id);
                }
            }
            for s in &entry.lab_tests {
                if let Some(id) = lab_tests.resolve(s, name, options, &mut dropped)? {
                    profile.lab_test_ids.insert(id);
                }
            }
            for s in &entry.post_mortem_tests {
                if let Some(id) = post_mortem.resolve(s, name, options, &mut dropped)? {
                    profile.post_mortem_test_ids.insert(id);
                }
            }

            if profile.is_empty_profile() {
                warn!(disease = name, "disease has no symptoms or signs and will never be suggested");
            }
            diseases.push(profile);
        }

        let catalog = Self {
            symptoms: symptoms
                .entries
                .into_iter()
                .enumerate()
                .map(|(i, e)| Symptom { id: SymptomId::new(i as u32 + 1), name: e.name, description: e.description })
                .collect(),
            signs: signs
                .entries
                .into_iter()
                .enumerate()
                .map(|(i, e)| Sign { id: SignId::new(i as u32 + 1), name: e.name, description: e.description })
                .collect(),
            lab_tests: lab_tests
                .entries
                .into_iter()
                .enumerate()
                .map(|(i, e)| LabTest { id: LabTestId::new(i as u32 + 1), name: e.name, description: e.description })
                .collect(),
            post_mortem_tests: post_mortem
                .entries
                .into_iter()
                .enumerate()
                .map(|(i, e)| PostMortemTest {
                    id: PostMortemTestId::new(i as u32 + 1),
                    name: e.name,
                    description: e.description,
                })
                .collect(),
            diseases,
            symptom_names: symptoms.by_name,
            sign_names: signs.by_name,
            dropped_references: dropped,
        };

        let stats = catalog.stats();
        info!(
            diseases = stats.diseases,
            symptoms = stats.symptoms,
            signs = stats.signs,
            lab_tests = stats.lab_tests,
            post_mortem_tests = stats.post_mortem_tests,
            empty_profiles = stats.empty_profiles,
            dropped_references = stats.dropped_references,
            "catalog built"
        );

        Ok(catalog)
    }

    pub fn diseases(&self) -> &[DiseaseProfile] {
        &self.diseases
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn signs(&self) -> &[Sign] {
        &self.signs
    }

    pub fn lab_tests(&self) -> &[LabTest] {
        &self.lab_tests
    }

    pub fn post_mortem_tests(&self) -> &[PostMortemTest] {
        &self.post_mortem_tests
    }

    pub fn disease(&self, id: DiseaseId) -> Option<&DiseaseProfile> {
        slot(id.get()).and_then(|i| self.diseases.get(i))
    }

    pub fn symptom(&self, id: SymptomId) -> Option<&Symptom> {
        slot(id.get()).and_then(|i| self.symptoms.get(i))
    }

    pub fn sign(&self, id: SignId) -> Option<&Sign> {
        slot(id.get()).and_then(|i| self.signs.get(i))
    }

    pub fn lab_test(&self, id: LabTestId) -> Option<&LabTest> {
        slot(id.get()).and_then(|i| self.lab_tests.get(i))
    }

    pub fn post_mortem_test(&self, id: PostMortemTestId) -> Option<&PostMortemTest> {
        slot(id.get()).and_then(|i| self.post_mortem_tests.get(i))
    }

    pub fn symptom_by_name(&self, name: &str) -> Option<SymptomId> {
        self.symptom_names.get(name.trim()).copied()
    }

    pub fn sign_by_name(&self, name: &str) -> Option<SignId> {
        self.sign_names.get(name.trim()).copied()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            diseases: self.diseases.len(),
            symptoms: self.symptoms.len(),
            signs: self.signs.len(),
            lab_tests: self.lab_tests.len(),
            post_mortem_tests: self.post_mortem_tests.len(),
            empty_profiles: self.diseases.iter().filter(|d| d.is_empty_profile()).count(),
            dropped_references: self.dropped_references,
        }
    }

    /// Resolve display names to an observation. Every unknown name is
    /// reported, in input order.
    pub fn observation_from_names<S, G>(&self, symptoms: S, signs: G) -> Result<ObservationSet>
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let mut observation = ObservationSet::default();
        let mut unknown_symptoms = Vec::new();
        let mut unknown_signs = Vec::new();

        for name in symptoms {
            match self.symptom_by_name(name.as_ref()) {
                Some(id) => {
                    observation.symptoms.insert(id);
                }
                None => unknown_symptoms.push(name.as_ref().to_string()),
            }
        }
        for name in signs {
            match self.sign_by_name(name.as_ref()) {
                Some(id) => {
                    observation.signs.insert(id);
                }
                None => unknown_signs.push(name.as_ref().to_string()),
            }
        }

        if unknown_symptoms.is_empty() && unknown_signs.is_empty() {
            Ok(observation)
        } else {
            Err(CatalogError::UnknownNames { symptoms: unknown_symptoms, signs: unknown_signs })
        }
    }

    /// Reject observations referencing ids this catalog does not define.
    pub fn check_observation(&self, observation: &ObservationSet) -> Result<()> {
        let symptoms: Vec<SymptomId> =
            observation.symptoms.iter().copied().filter(|id| self.symptom(*id).is_none()).collect();
        let signs: Vec<SignId> =
            observation.signs.iter().copied().filter(|id| self.sign(*id).is_none()).collect();

        if symptoms.is_empty() && signs.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::UnknownIds { symptoms, signs })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::DiseaseEntry;
    use pretty_assertions::assert_eq;

    fn seed() -> Catalog {
        Catalog::build(&KnowledgeBase::seed().unwrap(), BuildOptions::default()).unwrap()
    }

    fn disease_entry(name: &str, symptoms: &[&str], signs: &[&str]) -> DiseaseEntry {
        DiseaseEntry {
            name: name.to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            signs: signs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_seed_auto_creates_referenced_names() {
        let stats = seed().stats();
        assert_eq!(
            stats,
            CatalogStats {
                diseases: 5,
                symptoms: 18,
                signs: 13,
                lab_tests: 13,
                post_mortem_tests: 7,
                empty_profiles: 0,
                dropped_references: 0,
            }
        );
    }

    #[test]
    fn test_ids_follow_document_order() {
        let catalog = seed();
        assert_eq!(catalog.symptom_by_name("Dolor de cabeza intenso"), Some(SymptomId::new(1)));
        assert_eq!(catalog.sign_by_name("Fiebre (>38°C)"), Some(SignId::new(1)));
        // first name created on the fly, from the influenza profile
        assert_eq!(catalog.symptom_by_name("Tos seca"), Some(SymptomId::new(13)));
        assert_eq!(catalog.disease(DiseaseId::new(2)).unwrap().name, "COVID-19");
        assert!(catalog.disease(DiseaseId::new(0)).is_none());
        assert!(catalog.disease(DiseaseId::new(6)).is_none());
    }

    #[test]
    fn test_covid_profile_resolved() {
        let catalog = seed();
        let covid = catalog.disease(DiseaseId::new(2)).unwrap();
        assert_eq!(covid.profile_size(), 6);
        assert_eq!(covid.lab_test_ids.len(), 3);
        assert_eq!(covid.post_mortem_test_ids.len(), 1);
        let names: Vec<&str> = covid
            .sign_ids
            .iter()
            .map(|id| catalog.sign(*id).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["Fiebre (>38°C)", "Cianosis (Coloración azul)"]);
    }

    #[test]
    fn test_strict_mode_drops_unknown_references() {
        let kb = KnowledgeBase {
            symptoms: vec![CatalogEntry::named("Náuseas")],
            diseases: vec![disease_entry("Gastritis", &["Náuseas", "Acidez"], &["Desconocido"])],
            ..Default::default()
        };
        let catalog = Catalog::build(&kb, BuildOptions::strict()).unwrap();
        let gastritis = &catalog.diseases()[0];
        assert_eq!(gastritis.symptom_ids.len(), 1);
        assert!(gastritis.sign_ids.is_empty());
        assert_eq!(catalog.stats().dropped_references, 2);
        assert_eq!(catalog.symptoms().len(), 1);
        assert!(catalog.signs().is_empty());
    }

    #[test]
    fn test_duplicate_reference_names_merge() {
        let kb = KnowledgeBase {
            symptoms: vec![
                CatalogEntry::named("Náuseas"),
                CatalogEntry { name: " Náuseas ".into(), description: Some("dup".into()) },
            ],
            ..Default::default()
        };
        let catalog = Catalog::build(&kb, BuildOptions::default()).unwrap();
        assert_eq!(catalog.symptoms().len(), 1);
        assert_eq!(catalog.symptoms()[0].description, None);
    }

    #[test]
    fn test_duplicate_disease_is_an_error() {
        let kb = KnowledgeBase {
            diseases: vec![disease_entry("Gripe", &[], &[]), disease_entry("Gripe ", &[], &[])],
            ..Default::default()
        };
        let err = Catalog::build(&kb, BuildOptions::default()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateDisease(name) if name == "Gripe"));
    }

    #[test]
    fn test_empty_name_is_an_error() {
        let kb = KnowledgeBase { signs: vec![CatalogEntry::named("  ")], ..Default::default() };
        let err = Catalog::build(&kb, BuildOptions::default()).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyName { kind: "sign" }));
    }

    #[test]
    fn test_blank_reference_is_dropped_in_both_modes() {
        let kb = KnowledgeBase {
            diseases: vec![
                disease_entry("Good", &["Tos"], &[]),
                disease_entry("Bad", &["  "], &["Fiebre"]),
            ],
            ..Default::default()
        };
        for options in [BuildOptions::default(), BuildOptions::strict()] {
            let catalog = Catalog::build(&kb, options).unwrap();
            assert_eq!(catalog.diseases().len(), 2);
            assert!(catalog.diseases()[1].symptom_ids.is_empty());
            assert!(catalog.symptoms().iter().all(|s| !s.name.is_empty()));
        }
        let lenient = Catalog::build(&kb, BuildOptions::default()).unwrap();
        assert_eq!(lenient.stats().dropped_references, 1);
        assert_eq!(lenient.symptoms().len(), 1);
        assert_eq!(lenient.diseases()[1].sign_ids.len(), 1);
    }

    #[test]
    fn test_empty_profile_is_kept_but_counted() {
        let kb = KnowledgeBase {
            diseases: vec![disease_entry("Sin datos", &[], &[])],
            ..Default::default()
        };
        let catalog = Catalog::build(&kb, BuildOptions::default()).unwrap();
        assert_eq!(catalog.diseases().len(), 1);
        assert_eq!(catalog.stats().empty_profiles, 1);
    }

    #[test]
    fn test_observation_from_names_reports_unknowns() {
        let catalog = seed();
        let obs = catalog
            .observation_from_names(["Tos seca", "Fatiga crónica"], ["Fiebre (>38°C)"])
            .unwrap();
        assert_eq!(obs.symptoms.len(), 2);
        assert_eq!(obs.signs.len(), 1);

        let err = catalog
            .observation_from_names(["Tos seca", "Hipo"], ["Fiebre (>38°C)", "Tos seca"])
            .unwrap_err();
        match err {
            CatalogError::UnknownNames { symptoms, signs } => {
                assert_eq!(symptoms, vec!["Hipo"]);
                // a symptom name is not a sign
                assert_eq!(signs, vec!["Tos seca"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_observation_lists_unknown_ids() {
        let catalog = seed();
        let ok = ObservationSet::new([SymptomId::new(1)], [SignId::new(13)]);
        assert!(catalog.check_observation(&ok).is_ok());

        let bad = ObservationSet::new([SymptomId::new(19)], [SignId::new(14), SignId::new(1)]);
        match catalog.check_observation(&bad).unwrap_err() {
            CatalogError::UnknownIds { symptoms, signs } => {
                assert_eq!(symptoms, vec![SymptomId::new(19)]);
                assert_eq!(signs, vec![SignId::new(14)]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
