use std::path::PathBuf;

use clinyx_common::{SignId, SymptomId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read knowledge base {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("duplicate disease name: {0}")]
    DuplicateDisease(String),

    #[error("unknown symptoms {symptoms:?}, unknown signs {signs:?}")]
    UnknownNames {
        symptoms: Vec<String>,
        signs: Vec<String>,
    },

    #[error("unknown symptom ids {symptoms:?}, unknown sign ids {signs:?}")]
    UnknownIds {
        symptoms: Vec<SymptomId>,
        signs: Vec<SignId>,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
