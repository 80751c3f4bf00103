//! Typed reads over the talent graph.
//!
//! [`TalentStore`] is what the scoring engine, the composer and the
//! translator depend on. [`Neo4jTalentStore`] answers it with Cypher over any
//! [`GraphAccessor`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::schema::VectorIndex;
use super::{params, GraphAccessor, GraphError, Params, Row};
use crate::models::talent::{CandidateProfile, JobDetails};

const JOB_DETAILS_QUERY: &str = "
    MATCH (j:Job {title: $title})
    OPTIONAL MATCH (j)-[:REQUIRES_SKILL]->(s:Skill)
    RETURN j.title AS title, j.description AS description,
           collect(DISTINCT s.name) AS required_skills";

const PROFILE_PROJECTION: &str = "
    RETURN coalesce(p.name, '') AS name, p.email AS email,
           [(p)-[:HAS_SKILL]->(s:Skill) | s.name] AS skills,
           [(p)-[:HAS_EDUCATION]->(e:Education) |
               {degree: e.degree, institution: e.institution, graduation_year: e.graduation_year}] AS education,
           [(p)-[:HAS_EXPERIENCE]->(r:Role) |
               {title: r.title, company: r.company, years: r.years, description: r.description}] AS roles,
           [(p)-[:PROJECT_DONE]->(pr:Project) | pr.title] AS projects";

/// A node returned by a vector index lookup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimilarNode {
    /// Value of the index's key property (email or job title).
    pub id: String,
    /// Similarity reported by the index; higher is closer.
    pub score: f64,
}

/// A node whose embedding has not been computed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEmbedding {
    pub id: String,
    /// Text the embedding is derived from.
    pub text: String,
}

#[async_trait]
pub trait TalentStore: Send + Sync {
    async fn job_details(&self, title: &str) -> Result<Option<JobDetails>, GraphError>;

    async fn candidate_profile(&self, email: &str)
        -> Result<Option<CandidateProfile>, GraphError>;

    /// Every person in the graph with skills, education and roles attached.
    async fn candidate_profiles(&self) -> Result<Vec<CandidateProfile>, GraphError>;

    /// Executes query text as-is, with no parameter binding.
    async fn execute_raw(&self, statement: &str) -> Result<Vec<Row>, GraphError>;

    async fn vector_query(
        &self,
        index: VectorIndex,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<SimilarNode>, GraphError>;

    async fn nodes_missing_embedding(
        &self,
        index: VectorIndex,
    ) -> Result<Vec<PendingEmbedding>, GraphError>;

    async fn set_embedding(
        &self,
        index: VectorIndex,
        id: &str,
        embedding: &[f32],
    ) -> Result<(), GraphError>;
}

#[derive(Clone)]
pub struct Neo4jTalentStore {
    graph: Arc<dyn GraphAccessor>,
}

impl Neo4jTalentStore {
    pub fn new(graph: Arc<dyn GraphAccessor>) -> Self {
        Self { graph }
    }

    async fn query_one<T: serde::de::DeserializeOwned>(
        &self,
        statement: &str,
        params: Params,
    ) -> Result<Option<T>, GraphError> {
        match self.graph.query(statement, params).await?.into_iter().next() {
            Some(row) => row.decode().map(Some),
            None => Ok(None),
        }
    }
}

/// Joins a node's text properties the way they are embedded: one
/// `key: value` line per property, skipping missing values.
pub fn embedding_text(pairs: &[(&str, Option<&str>)]) -> String {
    pairs
        .iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}: {v}")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn vector_json(embedding: &[f32]) -> serde_json::Value {
    json!(embedding.iter().map(|v| f64::from(*v)).collect::<Vec<_>>())
}

#[async_trait]
impl TalentStore for Neo4jTalentStore {
    async fn job_details(&self, title: &str) -> Result<Option<JobDetails>, GraphError> {
        self.query_one(JOB_DETAILS_QUERY, params([("title", json!(title))]))
            .await
    }

    async fn candidate_profile(
        &self,
        email: &str,
    ) -> Result<Option<CandidateProfile>, GraphError> {
        let statement = format!("MATCH (p:Person {{email: $email}}){PROFILE_PROJECTION}");
        self.query_one(&statement, params([("email", json!(email))]))
            .await
    }

    async fn candidate_profiles(&self) -> Result<Vec<CandidateProfile>, GraphError> {
        let statement = format!("MATCH (p:Person) WHERE p.email IS NOT NULL{PROFILE_PROJECTION}");
        self.graph
            .query(&statement, Params::new())
            .await?
            .into_iter()
            .map(Row::decode)
            .collect()
    }

    async fn execute_raw(&self, statement: &str) -> Result<Vec<Row>, GraphError> {
        self.graph.query(statement, Params::new()).await
    }

    async fn vector_query(
        &self,
        index: VectorIndex,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<SimilarNode>, GraphError> {
        let statement = format!(
            "CALL db.index.vector.queryNodes($index, $k, $embedding) YIELD node, score
             RETURN node.{} AS id, score",
            index.key_property()
        );
        self.graph
            .query(
                &statement,
                params([
                    ("index", json!(index.name())),
                    ("k", json!(k)),
                    ("embedding", vector_json(embedding)),
                ]),
            )
            .await?
            .into_iter()
            .map(Row::decode)
            .collect()
    }

    async fn nodes_missing_embedding(
        &self,
        index: VectorIndex,
    ) -> Result<Vec<PendingEmbedding>, GraphError> {
        let props = index.text_properties();
        let columns = props
            .iter()
            .map(|p| format!("n.{p} AS {p}"))
            .collect::<Vec<_>>()
            .join(", ");
        let statement = format!(
            "MATCH (n:{label}) WHERE n.{embedding} IS NULL AND n.{key} IS NOT NULL
             RETURN n.{key} AS id, {columns}",
            label = index.label(),
            embedding = index.embedding_property(),
            key = index.key_property(),
        );

        let rows = self.graph.query(&statement, Params::new()).await?;
        rows.into_iter()
            .map(|row| -> Result<PendingEmbedding, GraphError> {
                let id: String = row.get("id")?;
                let values = props
                    .iter()
                    .map(|p| row.get::<Option<String>>(p).map(|v| (*p, v)))
                    .collect::<Result<Vec<_>, _>>()?;
                let pairs: Vec<(&str, Option<&str>)> =
                    values.iter().map(|(k, v)| (*k, v.as_deref())).collect();
                Ok(PendingEmbedding {
                    id,
                    text: embedding_text(&pairs),
                })
            })
            .collect()
    }

    async fn set_embedding(
        &self,
        index: VectorIndex,
        id: &str,
        embedding: &[f32],
    ) -> Result<(), GraphError> {
        let statement = format!(
            "MATCH (n:{label} {{{key}: $id}}) SET n.{property} = $embedding",
            label = index.label(),
            key = index.key_property(),
            property = index.embedding_property(),
        );
        self.graph
            .run(
                &statement,
                params([("id", json!(id)), ("embedding", vector_json(embedding))]),
            )
            .await
    }
}
