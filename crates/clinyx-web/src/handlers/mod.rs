//! HTTP handlers for all web routes.

pub mod system;
pub mod catalog;
pub mod inference;
pub mod page;

#[cfg(test)]
pub(crate) fn test_state() -> crate::state::SharedState {
    use clinyx_catalog::SeedCatalogProvider;
    use clinyx_config::InferenceConfig;
    use std::sync::Arc;

    let state = crate::state::AppState::new(
        Arc::new(SeedCatalogProvider::default()),
        InferenceConfig::default(),
    )
    .expect("seed catalog builds");
    Arc::new(state)
}
