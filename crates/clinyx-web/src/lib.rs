//! clinyx-web — HTTP boundary for the diagnosis suggestion engine.
//! Provides:
//!   - JSON inference API (by id and by name)
//!   - Catalog listings for building the selection form
//!   - A minimal HTML inference page
//!   - Catalog reload and health endpoints

pub mod error;
pub mod router;
pub mod handlers;
pub mod state;
