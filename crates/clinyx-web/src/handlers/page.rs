//! Inference page: checkbox form over the catalog and a result table.

use axum::{
    extract::{Form, State},
    response::Html,
};
use clinyx_common::{ObservationSet, SignId, SymptomId};

use crate::error::ApiError;
use crate::handlers::inference::{run_inference, InferenceResponse, Presentation};
use crate::state::{SharedState, Snapshot};

/// GET /inference
pub async fn inference_page(State(state): State<SharedState>) -> Html<String> {
    let snapshot = state.snapshot();
    Html(render_page(&snapshot, &ObservationSet::default(), None))
}

/// POST /inference. Form fields are repeated `symptom=<id>` and `sign=<id>`
pub async fn inference_submit(
    State(state): State<SharedState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, ApiError> {
    let observation = observation_from_form(&fields)?;
    let snapshot = state.snapshot();
    snapshot.catalog.check_observation(&observation)?;

    let presentation = Presentation::resolve(&state.inference, None, None)?;
    let response = run_inference(&snapshot, &observation, presentation);
    Ok(Html(render_page(&snapshot, &observation, Some(&response))))
}

fn observation_from_form(fields: &[(String, String)]) -> Result<ObservationSet, ApiError> {
    let mut observation = ObservationSet::default();
    for (key, value) in fields {
        match key.as_str() {
            "symptom" => {
                observation.symptoms.insert(value.parse::<SymptomId>()?);
            }
            "sign" => {
                observation.signs.insert(value.parse::<SignId>()?);
            }
            _ => {}
        }
    }
    Ok(observation)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn checkbox(field: &str, id: u32, name: &str, checked: bool) -> String {
    format!(
        r#"<label class="check"><input type="checkbox" name="{}" value="{}"{}> {}</label>"#,
        field,
        id,
        if checked { " checked" } else { "" },
        escape(name)
    )
}

fn render_results(response: &InferenceResponse) -> String {
    if response.suggestions.is_empty() {
        return r#"<p class="text-muted">No disease matches the selected findings.</p>"#.to_string();
    }

    let rows: String = response
        .suggestions
        .iter()
        .map(|s| {
            let matched: Vec<String> = s
                .matched_symptoms
                .iter()
                .chain(&s.matched_signs)
                .map(|n| escape(n))
                .collect();
            let tests: Vec<String> = s.lab_tests.iter().map(|n| escape(n)).collect();
            format!(
                r#"
            <tr>
                <td>#{}</td>
                <td><a href="/api/diseases/{}">{}</a></td>
                <td>{}%</td>
                <td>{} / {}</td>
                <td>{}</td>
                <td>{}</td>
            </tr>"#,
                s.rank,
                s.disease_id,
                escape(&s.disease),
                s.score,
                s.matches,
                s.profile_size,
                matched.join(", "),
                tests.join(", ")
            )
        })
        .collect();

    format!(
        r#"
    <table class="table">
        <thead>
            <tr><th>Rank</th><th>Disease</th><th>Score</th><th>Matches</th><th>Matched findings</th><th>Confirmatory tests</th></tr>
        </thead>
        <tbody>{}
        </tbody>
    </table>
    <p class="text-muted">{} of {} candidate diseases shown.</p>"#,
        rows,
        response.suggestions.len(),
        response.candidates
    )
}

fn render_page(
    snapshot: &Snapshot,
    observation: &ObservationSet,
    response: Option<&InferenceResponse>,
) -> String {
    let catalog = &snapshot.catalog;
    let symptoms: String = catalog
        .symptoms()
        .iter()
        .map(|s| checkbox("symptom", s.id.get(), &s.name, observation.symptoms.contains(&s.id)))
        .collect();
    let signs: String = catalog
        .signs()
        .iter()
        .map(|s| checkbox("sign", s.id.get(), &s.name, observation.signs.contains(&s.id)))
        .collect();
    let results = response.map(render_results).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Inference - Clinyx</title>
</head>
<body>
<main class="main-content">
    <h1 class="page-title">Diagnosis suggestions</h1>
    <p class="text-muted">Select the symptoms reported by the patient and the signs measured on examination.</p>
    <form method="post" action="/inference">
        <fieldset>
            <legend>Symptoms</legend>
            {}
        </fieldset>
        <fieldset>
            <legend>Signs</legend>
            {}
        </fieldset>
        <button type="submit" class="btn">Rank diseases</button>
    </form>
    {}
</main>
</body>
</html>"#,
        symptoms, signs, results
    )
}
