mod chat;
mod config;
mod embedding;
mod errors;
mod extract;
mod graph;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
mod translator;

#[cfg(test)]
mod testing;

use anyhow::Result;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::{backfill_embeddings, OpenAiEmbedder};
use crate::graph::schema::VectorIndex;
use crate::graph::talent::Neo4jTalentStore;
use crate::graph::{ensure_indexes, Neo4jGraph};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Neo4j
    let graph = Arc::new(
        Neo4jGraph::connect(
            &config.neo4j_uri,
            &config.neo4j_username,
            &config.neo4j_password,
        )
        .await?,
    );
    ensure_indexes(graph.as_ref()).await?;
    info!("Graph indexes ready");

    let store = Arc::new(Neo4jTalentStore::new(graph));

    // Initialize embeddings
    let embedder = Arc::new(OpenAiEmbedder::new(config.openai_api_key.clone())?);
    info!("Embedding client initialized (model: {})", embedding::EMBEDDING_MODEL);

    if config.embedding_backfill {
        for index in VectorIndex::ALL {
            if let Err(e) = backfill_embeddings(embedder.as_ref(), store.as_ref(), index).await {
                warn!("Embedding backfill for {} failed: {e}", index.label());
            }
        }
    }

    // Initialize LLM client
    let llm = Arc::new(LlmClient::new(config.groq_api_key.clone())?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        store,
        llm,
        embedder,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.cors_allowed_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped; closing graph and HTTP clients");
    Ok(())
}

/// CORS for the browser frontend: listed origins, credentials allowed.
fn build_cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
