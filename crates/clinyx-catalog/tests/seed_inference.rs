//! End-to-end ranking over the bundled knowledge base.

use clinyx_catalog::{BuildOptions, Catalog, KnowledgeBase};
use clinyx_ranker::{rank_observation, MatchRanker, Strategy};
use pretty_assertions::assert_eq;

fn seed() -> Catalog {
    Catalog::build(&KnowledgeBase::seed().unwrap(), BuildOptions::default()).unwrap()
}

#[test]
fn respiratory_picture_ranks_covid_first() {
    let catalog = seed();
    let obs = catalog
        .observation_from_names(
            ["Pérdida del olfato", "Dificultad para respirar", "Tos seca", "Fatiga crónica"],
            ["Fiebre (>38°C)"],
        )
        .unwrap();

    let out = rank_observation(&obs, catalog.diseases());
    let rows: Vec<(&str, String, usize, usize)> = out
        .iter()
        .map(|s| (s.disease.name.as_str(), s.score.to_string(), s.matches, s.profile_size))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("COVID-19", "83.3".to_string(), 5, 6),
            ("Gripe Estacional (Influenza)", "42.9".to_string(), 3, 7),
            ("Diabetes Mellitus Tipo 2", "16.7".to_string(), 1, 6),
            ("Hepatitis Viral", "16.7".to_string(), 1, 6),
        ]
    );
}

#[test]
fn fatigue_alone_ties_are_broken_by_name() {
    let catalog = seed();
    let obs = catalog.observation_from_names(["Fatiga crónica"], Vec::<&str>::new()).unwrap();
    let ranker = MatchRanker::new(catalog.diseases().to_vec(), Strategy::Indexed);

    let names: Vec<&str> = ranker.rank(&obs).iter().map(|s| s.disease.name.as_str()).collect();
    // influenza has 7 features (14.3), the other three have 6 (16.7)
    assert_eq!(
        names,
        vec![
            "COVID-19",
            "Diabetes Mellitus Tipo 2",
            "Hepatitis Viral",
            "Gripe Estacional (Influenza)",
        ]
    );
}
