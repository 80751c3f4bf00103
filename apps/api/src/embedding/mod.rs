//! Text embeddings and nearest-neighbour search over the graph's vector indexes.
//!
//! Every vector must have [`EMBEDDING_DIMENSIONS`] components: the indexes are
//! built at that size with cosine similarity, and a vector of any other length
//! is rejected before it reaches the database.

use std::cmp::Ordering;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::graph::schema::{VectorIndex, EMBEDDING_DIMENSIONS};
use crate::graph::talent::{SimilarNode, TalentStore};

const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
pub const EMBEDDING_MODEL: &str = "text-embedding-3-small";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("expected a {expected}-dimensional embedding, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding response contained no vectors")]
    Empty,
}

/// Turns text into a fixed-length vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
}

impl OpenAiEmbedder {
    pub fn new(api_key: String) -> Result<Self, EmbeddingError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
        })
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let response = self
            .client
            .post(OPENAI_EMBEDDINGS_URL)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: EMBEDDING_MODEL,
                input: text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EmbeddingResponse = response.json().await?;
        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or(EmbeddingError::Empty)?;
        check_dimensions(vector)
    }
}

pub fn check_dimensions(vector: Vec<f32>) -> Result<Vec<f32>, EmbeddingError> {
    if vector.len() != EMBEDDING_DIMENSIONS {
        return Err(EmbeddingError::DimensionMismatch {
            expected: EMBEDDING_DIMENSIONS,
            actual: vector.len(),
        });
    }
    Ok(vector)
}

/// A similarity hit expressed as a distance: 0 is identical.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub id: String,
    pub distance: f64,
}

/// Converts index similarities to distances, nearest first.
pub fn by_distance(nodes: Vec<SimilarNode>) -> Vec<Neighbor> {
    let mut neighbors: Vec<Neighbor> = nodes
        .into_iter()
        .map(|n| Neighbor {
            id: n.id,
            distance: 1.0 - n.score,
        })
        .collect();
    neighbors.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
    });
    neighbors
}

/// Embeds `text` and returns the `k` nearest nodes of `index`, nearest first.
pub async fn similarity_search(
    embedder: &dyn Embedder,
    store: &dyn TalentStore,
    text: &str,
    index: VectorIndex,
    k: usize,
) -> Result<Vec<Neighbor>, AppError> {
    let vector = check_dimensions(embedder.embed(text).await?)?;
    let nodes = store.vector_query(index, &vector, k).await?;
    debug!(
        "Vector search on {} returned {} nodes",
        index.name(),
        nodes.len()
    );
    Ok(by_distance(nodes))
}

/// Embeds every node of `index` that has no vector yet. Returns how many
/// nodes were written.
pub async fn backfill_embeddings(
    embedder: &dyn Embedder,
    store: &dyn TalentStore,
    index: VectorIndex,
) -> Result<usize, AppError> {
    let pending = store.nodes_missing_embedding(index).await?;
    let mut written = 0;

    for node in &pending {
        if node.text.is_empty() {
            warn!("Skipping {} '{}': no text to embed", index.label(), node.id);
            continue;
        }
        let vector = embedder.embed(&node.text).await?;
        store.set_embedding(index, &node.id, &vector).await?;
        written += 1;
    }

    info!("Backfilled {written} {} embeddings", index.label());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedEmbedder, InMemoryTalentStore};

    #[test]
    fn test_check_dimensions_rejects_wrong_length() {
        let err = check_dimensions(vec![0.0; 768]).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 1536,
                actual: 768
            }
        ));
    }

    #[test]
    fn test_by_distance_orders_ascending() {
        let neighbors = by_distance(vec![
            SimilarNode {
                id: "far".to_string(),
                score: 0.5,
            },
            SimilarNode {
                id: "near".to_string(),
                score: 0.9,
            },
        ]);
        assert_eq!(neighbors[0].id, "near");
        assert!((neighbors[0].distance - 0.1).abs() < 1e-9);
        assert_eq!(neighbors[1].id, "far");
    }

    #[tokio::test]
    async fn test_similarity_search_rejects_mismatched_embedder() {
        let store = InMemoryTalentStore::default();
        let embedder = FixedEmbedder::with_dimensions(3);

        let err = similarity_search(&embedder, &store, "python", VectorIndex::Person, 5)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Embedding(EmbeddingError::DimensionMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_similarity_search_returns_nearest_first() {
        let store = InMemoryTalentStore::default().with_similar(vec![
            ("b@example.com", 0.70),
            ("a@example.com", 0.95),
        ]);
        let embedder = FixedEmbedder::default();

        let hits = similarity_search(&embedder, &store, "python", VectorIndex::Person, 2)
            .await
            .unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a@example.com", "b@example.com"]);
    }

    #[tokio::test]
    async fn test_backfill_writes_each_pending_node() {
        let store = InMemoryTalentStore::default().with_pending(vec![
            ("ada@example.com", "name: Ada\nemail: ada@example.com"),
            ("blank@example.com", ""),
        ]);
        let embedder = FixedEmbedder::default();

        let written = backfill_embeddings(&embedder, &store, VectorIndex::Person)
            .await
            .unwrap();
        assert_eq!(written, 1);
        assert_eq!(store.embedded_ids(), vec!["ada@example.com".to_string()]);
    }
}
