use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::state::AppState;
use crate::translator::{retrieve_graph_info, GraphInfo};

#[derive(Debug, Deserialize)]
pub struct GraphQueryInput {
    pub query: String,
}

/// POST /retrieve-graph-info/
///
/// Translates the question into Cypher and runs it. A query that fails to
/// execute still answers 200, with `error` set and empty `results`.
pub async fn handle_retrieve_graph_info(
    State(state): State<AppState>,
    AppJson(input): AppJson<GraphQueryInput>,
) -> Result<Json<GraphInfo>, AppError> {
    let info = retrieve_graph_info(state.llm.as_ref(), state.store.as_ref(), &input.query).await?;
    Ok(Json(info))
}
