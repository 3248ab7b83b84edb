//! HTTP surface of the recommender.
//!
//! Thin glue: every handler delegates to `Recommender` and maps its errors.

pub mod endpoints;
pub mod error;
pub mod router;

use std::sync::Arc;

use cohortrx_core::{CorpusSource, Recommender};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Recommender>,
    /// Where `POST /data/reload` reads the corpus from.
    pub source: Arc<dyn CorpusSource>,
}
