//! Axum route handlers for the chat endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::composer::answer;
use crate::chat::mode::{ChatMode, INVALID_MODE_MESSAGE};
use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::matching::score_candidates;
use crate::matching::weights::ScoringWeights;
use crate::models::talent::ScoredCandidate;
use crate::state::AppState;
use crate::translator::{retrieve_graph_info, GraphInfo};

#[derive(Debug, Deserialize)]
pub struct ChatResponseQuery {
    pub query: String,
    pub job_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseBody {
    pub query: String,
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
    pub mode: ChatMode,
}

/// Text for `resume-job` and unknown modes, structured data for `job-match`
/// and `info`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatPayload {
    Text(String),
    Matches(Vec<ScoredCandidate>),
    GraphInfo(GraphInfo),
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: ChatPayload,
}

/// GET /chat-response/?query=...&job_title=...
pub async fn handle_chat_response(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ChatResponseQuery>,
) -> Result<Json<ChatResponseBody>, AppError> {
    let response = answer(
        state.llm.as_ref(),
        state.store.as_ref(),
        &params.query,
        params.job_title.as_deref(),
    )
    .await?;

    Ok(Json(ChatResponseBody {
        query: params.query,
        response,
    }))
}

/// POST /chat
///
/// Routes `text` by `mode`. Any failure comes back as `{"error": ...}`.
pub async fn handle_chat(
    State(state): State<AppState>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let response = match request.mode {
        ChatMode::ResumeJob => ChatPayload::Text(
            answer(state.llm.as_ref(), state.store.as_ref(), &request.text, None).await?,
        ),
        ChatMode::JobMatch => ChatPayload::Matches(
            score_candidates(
                state.store.as_ref(),
                &request.text,
                &ScoringWeights::default(),
            )
            .await?,
        ),
        ChatMode::Info => ChatPayload::GraphInfo(
            retrieve_graph_info(state.llm.as_ref(), state.store.as_ref(), &request.text).await?,
        ),
        ChatMode::Unknown => ChatPayload::Text(INVALID_MODE_MESSAGE.to_string()),
    };

    Ok(Json(ChatReply { response }))
}
