pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::matching::handlers as matching;
use crate::state::AppState;
use crate::translator::handlers as translator;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Matching
        .route(
            "/match-candidates/",
            get(matching::handle_match_candidates),
        )
        .route("/find-candidates/", get(matching::handle_find_candidates))
        .route("/semantic-match/", get(matching::handle_semantic_match))
        .route("/jobs/:title", get(matching::handle_get_job))
        .route("/candidates/:email", get(matching::handle_get_candidate))
        // Chat
        .route("/chat-response/", get(chat::handle_chat_response))
        .route("/chat", post(chat::handle_chat))
        // Graph questions
        .route(
            "/retrieve-graph-info/",
            post(translator::handle_retrieve_graph_info),
        )
        .with_state(state)
}
