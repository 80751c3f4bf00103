use std::sync::Arc;

use crate::embedding::Embedder;
use crate::graph::talent::TalentStore;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Built once in `main` from long-lived clients; handlers only read through it.
#[derive(Clone)]
pub struct AppState {
    /// Typed reads over the talent graph.
    pub store: Arc<dyn TalentStore>,
    /// Chat completions for the translator and the composer.
    pub llm: Arc<dyn ChatModel>,
    pub embedder: Arc<dyn Embedder>,
}
