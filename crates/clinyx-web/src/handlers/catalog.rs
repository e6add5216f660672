//! Catalog listings: what a physician can select, and what each disease lists.

use axum::{
    extract::{Path, State},
    Json,
};
use clinyx_catalog::CatalogStats;
use clinyx_common::{DiseaseId, LabTestId, PostMortemTestId, Sign, SignId, Symptom, SymptomId};
use serde::Serialize;
use tracing::warn;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct DiseaseSummary {
    pub id: DiseaseId,
    pub name: String,
    pub profile_size: usize,
}

#[derive(Debug, Serialize)]
pub struct NamedRef<Id> {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct DiseaseDetail {
    pub id: DiseaseId,
    pub name: String,
    pub description: String,
    pub profile_size: usize,
    pub symptoms: Vec<NamedRef<SymptomId>>,
    pub signs: Vec<NamedRef<SignId>>,
    pub lab_tests: Vec<NamedRef<LabTestId>>,
    pub post_mortem_tests: Vec<NamedRef<PostMortemTestId>>,
}

/// GET /api/catalog/stats
pub async fn api_stats(State(state): State<SharedState>) -> Json<CatalogStats> {
    Json(state.snapshot().catalog.stats())
}

/// GET /api/catalog/symptoms
pub async fn api_symptoms(State(state): State<SharedState>) -> Json<Vec<Symptom>> {
    Json(state.snapshot().catalog.symptoms().to_vec())
}

/// GET /api/catalog/signs
pub async fn api_signs(State(state): State<SharedState>) -> Json<Vec<Sign>> {
    Json(state.snapshot().catalog.signs().to_vec())
}

/// GET /api/diseases
pub async fn api_diseases(State(state): State<SharedState>) -> Json<Vec<DiseaseSummary>> {
    let snapshot = state.snapshot();
    let rows = snapshot
        .catalog
        .diseases()
        .iter()
        .map(|d| DiseaseSummary { id: d.id, name: d.name.clone(), profile_size: d.profile_size() })
        .collect();
    Json(rows)
}

/// GET /api/diseases/{id}
pub async fn api_disease_detail(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DiseaseDetail>, ApiError> {
    let id: DiseaseId = id.parse()?;
    let snapshot = state.snapshot();
    let catalog = &snapshot.catalog;
    let disease = catalog
        .disease(id)
        .ok_or_else(|| ApiError::NotFound(format!("No disease with id {id}")))?;

    Ok(Json(DiseaseDetail {
        id: disease.id,
        name: disease.name.clone(),
        description: disease.description.clone(),
        profile_size: disease.profile_size(),
        symptoms: disease
            .symptom_ids
            .iter()
            .filter_map(|id| catalog.symptom(*id))
            .map(|s| NamedRef { id: s.id, name: s.name.clone() })
            .collect(),
        signs: disease
            .sign_ids
            .iter()
            .filter_map(|id| catalog.sign(*id))
            .map(|s| NamedRef { id: s.id, name: s.name.clone() })
            .collect(),
        lab_tests: disease
            .lab_test_ids
            .iter()
            .filter_map(|id| catalog.lab_test(*id))
            .map(|t| NamedRef { id: t.id, name: t.name.clone() })
            .collect(),
        post_mortem_tests: disease
            .post_mortem_test_ids
            .iter()
            .filter_map(|id| catalog.post_mortem_test(*id))
            .map(|t| NamedRef { id: t.id, name: t.name.clone() })
            .collect(),
    }))
}

/// POST /api/catalog/reload: rebuild the snapshot from the configured source
pub async fn api_reload(State(state): State<SharedState>) -> Result<Json<CatalogStats>, ApiError> {
    match state.reload() {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            warn!(error = %e, "catalog reload failed; keeping previous snapshot");
            Err(e.into())
        }
    }
}
