//! Knowledge base document format.
//!
//! Diseases reference the reference catalogs by name, the way clinicians
//! write them down. Ids are assigned later by [`crate::Catalog::build`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

const SEED_TOML: &str = include_str!("../seed/knowledge_base.toml");

/// A named reference catalog entry (symptom, sign, lab or post-mortem test).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiseaseEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub signs: Vec<String>,
    #[serde(default)]
    pub lab_tests: Vec<String>,
    #[serde(default)]
    pub post_mortem_tests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub symptoms: Vec<CatalogEntry>,
    #[serde(default)]
    pub signs: Vec<CatalogEntry>,
    #[serde(default)]
    pub lab_tests: Vec<CatalogEntry>,
    #[serde(default)]
    pub post_mortem_tests: Vec<CatalogEntry>,
    #[serde(default)]
    pub diseases: Vec<DiseaseEntry>,
}

impl KnowledgeBase {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from disk. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// The knowledge base bundled with the binary: the reference catalogs
    /// and five common diseases.
    pub fn seed() -> Result<Self> {
        Self::from_toml_str(SEED_TOML)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_parses() {
        let kb = KnowledgeBase::seed().unwrap();
        assert_eq!(kb.diseases.len(), 5);
        assert_eq!(kb.symptoms.len(), 12);
        assert_eq!(kb.signs.len(), 10);
        assert_eq!(kb.lab_tests.len(), 11);
        assert_eq!(kb.post_mortem_tests.len(), 7);
        assert!(kb.diseases.iter().any(|d| d.name == "COVID-19"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let kb = KnowledgeBase::from_toml_str(
            r#"
            [[diseases]]
            name = "Migraña"
            symptoms = ["Dolor de cabeza intenso"]
            "#,
        )
        .unwrap();
        assert!(kb.symptoms.is_empty());
        assert_eq!(kb.diseases[0].symptoms, vec!["Dolor de cabeza intenso"]);
        assert!(kb.diseases[0].signs.is_empty());
        assert_eq!(kb.diseases[0].description, "");
    }

    #[test]
    fn test_json_and_toml_agree() {
        let from_json = KnowledgeBase::from_json_str(
            r#"{"signs":[{"name":"Taquicardia"}],"diseases":[{"name":"X","signs":["Taquicardia"]}]}"#,
        )
        .unwrap();
        let from_toml = KnowledgeBase::from_toml_str(
            r#"
            signs = [{ name = "Taquicardia" }]
            diseases = [{ name = "X", signs = ["Taquicardia"] }]
            "#,
        )
        .unwrap();
        assert_eq!(from_json, from_toml);
    }

    #[test]
    fn test_load_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("kb.json");
        std::fs::write(&json_path, r#"{"symptoms":[{"name":"Náuseas"}]}"#).unwrap();
        assert_eq!(KnowledgeBase::load(&json_path).unwrap().symptoms.len(), 1);

        let toml_path = dir.path().join("kb.toml");
        std::fs::write(&toml_path, "[[symptoms]]\nname = \"Náuseas\"\n").unwrap();
        assert_eq!(KnowledgeBase::load(&toml_path).unwrap().symptoms.len(), 1);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = KnowledgeBase::load("/nonexistent/kb.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/kb.toml"));
    }
}
