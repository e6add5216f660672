//! Inference API: ranks the catalog against an observation.
//!
//! Top-N truncation and the score floor are presentation policy and live
//! here, applied after ranking.

use axum::{extract::State, Json};
use clinyx_common::{DiseaseId, ObservationSet, SignId, SymptomId};
use clinyx_config::InferenceConfig;
use clinyx_ranker::{RankedSuggestion, Score};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::{SharedState, Snapshot};

#[derive(Debug, Default, Deserialize)]
pub struct InferenceRequest {
    #[serde(default)]
    pub symptoms: Vec<SymptomId>,
    #[serde(default)]
    pub signs: Vec<SignId>,
    pub max_suggestions: Option<usize>,
    pub min_score: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NamedInferenceRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub signs: Vec<String>,
    pub max_suggestions: Option<usize>,
    pub min_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionView {
    pub rank: usize,
    pub disease_id: DiseaseId,
    pub disease: String,
    pub score: Score,
    pub matches: usize,
    pub profile_size: usize,
    pub matched_symptoms: Vec<String>,
    pub matched_signs: Vec<String>,
    pub lab_tests: Vec<String>,
    pub post_mortem_tests: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InferenceResponse {
    pub observed_symptoms: usize,
    pub observed_signs: usize,
    /// Diseases with any overlap, before truncation and the score floor.
    pub candidates: usize,
    pub suggestions: Vec<SuggestionView>,
}

/// Top-N and score floor applied to a ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    /// 0 means unlimited.
    pub max_suggestions: usize,
    pub min_score: Score,
}

impl Presentation {
    /// Request values override the configured defaults.
    pub fn resolve(
        config: &InferenceConfig,
        max_suggestions: Option<usize>,
        min_score: Option<f64>,
    ) -> Result<Self, ApiError> {
        let floor = min_score.unwrap_or(config.min_score);
        if !floor.is_finite() || !(0.0..=100.0).contains(&floor) {
            return Err(ApiError::BadRequest(format!("min_score must be within 0..=100, got {floor}")));
        }
        Ok(Self {
            max_suggestions: max_suggestions.unwrap_or(config.max_suggestions),
            min_score: Score::from_percent(floor),
        })
    }

    pub fn apply<'a>(&self, ranked: Vec<RankedSuggestion<'a>>) -> Vec<RankedSuggestion<'a>> {
        let limit = if self.max_suggestions == 0 { usize::MAX } else { self.max_suggestions };
        ranked
            .into_iter()
            .filter(|s| s.score >= self.min_score)
            .take(limit)
            .collect()
    }
}

/// Rank, apply presentation policy, and resolve display names.
pub fn run_inference(
    snapshot: &Snapshot,
    observation: &ObservationSet,
    presentation: Presentation,
) -> InferenceResponse {
    let catalog = &snapshot.catalog;
    let ranked = snapshot.ranker.rank(observation);
    let candidates = ranked.len();

    let suggestions = presentation
        .apply(ranked)
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let d = s.disease;
            SuggestionView {
                rank: i + 1,
                disease_id: d.id,
                disease: d.name.clone(),
                score: s.score,
                matches: s.matches,
                profile_size: s.profile_size,
                matched_symptoms: d
                    .symptom_ids
                    .intersection(&observation.symptoms)
                    .filter_map(|id| catalog.symptom(*id))
                    .map(|x| x.name.clone())
                    .collect(),
                matched_signs: d
                    .sign_ids
                    .intersection(&observation.signs)
                    .filter_map(|id| catalog.sign(*id))
                    .map(|x| x.name.clone())
                    .collect(),
                lab_tests: d
                    .lab_test_ids
                    .iter()
                    .filter_map(|id| catalog.lab_test(*id))
                    .map(|x| x.name.clone())
                    .collect(),
                post_mortem_tests: d
                    .post_mortem_test_ids
                    .iter()
                    .filter_map(|id| catalog.post_mortem_test(*id))
                    .map(|x| x.name.clone())
                    .collect(),
            }
        })
        .collect();

    InferenceResponse {
        observed_symptoms: observation.symptoms.len(),
        observed_signs: observation.signs.len(),
        candidates,
        suggestions,
    }
}

/// POST /api/inference, observation given as symptom and sign ids
pub async fn api_infer(
    State(state): State<SharedState>,
    Json(req): Json<InferenceRequest>,
) -> Result<Json<InferenceResponse>, ApiError> {
    let presentation = Presentation::resolve(&state.inference, req.max_suggestions, req.min_score)?;
    let snapshot = state.snapshot();
    let observation = ObservationSet::new(req.symptoms, req.signs);
    snapshot.catalog.check_observation(&observation)?;

    let response = run_inference(&snapshot, &observation, presentation);
    info!(
        symptoms = response.observed_symptoms,
        signs = response.observed_signs,
        candidates = response.candidates,
        returned = response.suggestions.len(),
        "inference"
    );
    Ok(Json(response))
}

/// POST /api/inference/by-name, observation given as display names
pub async fn api_infer_by_name(
    State(state): State<SharedState>,
    Json(req): Json<NamedInferenceRequest>,
) -> Result<Json<InferenceResponse>, ApiError> {
    let presentation = Presentation::resolve(&state.inference, req.max_suggestions, req.min_score)?;
    let snapshot = state.snapshot();
    let observation = snapshot.catalog.observation_from_names(&req.symptoms, &req.signs)?;

    let response = run_inference(&snapshot, &observation, presentation);
    info!(
        symptoms = response.observed_symptoms,
        signs = response.observed_signs,
        candidates = response.candidates,
        returned = response.suggestions.len(),
        "inference by name"
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_state;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    fn by_name(symptoms: &[&str], signs: &[&str]) -> NamedInferenceRequest {
        NamedInferenceRequest {
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            signs: signs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_infer_by_ids() {
        // symptom 4 = Fatiga crónica, symptom 7 = Pérdida del olfato, sign 1 = Fiebre
        let req = InferenceRequest {
            symptoms: vec![SymptomId::new(4), SymptomId::new(7)],
            signs: vec![SignId::new(1)],
            ..Default::default()
        };
        let resp = api_infer(State(test_state()), Json(req)).await.unwrap().0;

        assert_eq!(resp.observed_symptoms, 2);
        assert_eq!(resp.observed_signs, 1);
        let top = &resp.suggestions[0];
        assert_eq!(top.rank, 1);
        assert_eq!(top.disease, "COVID-19");
        assert_eq!(top.score.to_string(), "50.0");
        assert_eq!(top.matched_symptoms, vec!["Fatiga crónica", "Pérdida del olfato"]);
        assert_eq!(top.matched_signs, vec!["Fiebre (>38°C)"]);
        assert_eq!(
            top.lab_tests,
            vec!["Radiografía de Tórax", "Tomografía Computarizada (TC)", "Prueba de PCR (Viral)"]
        );
        assert_eq!(top.post_mortem_tests, vec!["Autopsia Clínica Completa"]);
    }

    #[tokio::test]
    async fn test_empty_observation_returns_no_suggestions() {
        let resp = api_infer(State(test_state()), Json(InferenceRequest::default()))
            .await
            .unwrap()
            .0;
        assert_eq!(resp.candidates, 0);
        assert!(resp.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids_rejected() {
        let req = InferenceRequest { symptoms: vec![SymptomId::new(500)], ..Default::default() };
        let err = api_infer(State(test_state()), Json(req)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_by_name_and_limits() {
        let mut req = by_name(&["Fatiga crónica"], &[]);
        req.max_suggestions = Some(2);
        let resp = api_infer_by_name(State(test_state()), Json(req)).await.unwrap().0;
        assert_eq!(resp.candidates, 4);
        let names: Vec<&str> = resp.suggestions.iter().map(|s| s.disease.as_str()).collect();
        assert_eq!(names, vec!["COVID-19", "Diabetes Mellitus Tipo 2"]);
    }

    #[tokio::test]
    async fn test_score_floor_hides_weak_matches() {
        let mut req = by_name(&["Fatiga crónica"], &[]);
        req.min_score = Some(15.0);
        let resp = api_infer_by_name(State(test_state()), Json(req)).await.unwrap().0;
        // influenza scores 14.3 and is hidden
        assert_eq!(resp.suggestions.len(), 3);
        assert!(resp.suggestions.iter().all(|s| s.disease != "Gripe Estacional (Influenza)"));
    }

    #[tokio::test]
    async fn test_invalid_floor_rejected() {
        let mut req = by_name(&["Fatiga crónica"], &[]);
        req.min_score = Some(101.0);
        let err = api_infer_by_name(State(test_state()), Json(req)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_names_rejected() {
        let err = api_infer_by_name(State(test_state()), Json(by_name(&["Hipo"], &[])))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("Hipo"));
    }

    #[test]
    fn test_presentation_unlimited_when_zero() {
        let config = InferenceConfig { max_suggestions: 0, ..Default::default() };
        let p = Presentation::resolve(&config, None, None).unwrap();
        let catalog = clinyx_test_utils::sample_catalog();
        let ranked = clinyx_ranker::rank_observation(
            &clinyx_test_utils::observation(&[2], &[]),
            &catalog,
        );
        assert_eq!(p.apply(ranked).len(), 3);
    }

    #[test]
    fn test_floor_between_tenths_hides_lower_score() {
        let catalog = vec![clinyx_test_utils::disease(1, "Tercio", &[1, 2, 3], &[])];
        let obs = clinyx_test_utils::observation(&[1], &[]);
        let config = InferenceConfig::default();

        let strict = Presentation::resolve(&config, Some(0), Some(33.34)).unwrap();
        assert!(strict.apply(clinyx_ranker::rank_observation(&obs, &catalog)).is_empty());

        let exact = Presentation::resolve(&config, Some(0), Some(33.3)).unwrap();
        let shown = exact.apply(clinyx_ranker::rank_observation(&obs, &catalog));
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].score.to_string(), "33.3");
    }
}
