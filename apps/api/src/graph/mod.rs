//! Graph accessor over Neo4j.
//!
//! [`GraphAccessor`] is the seam every higher layer talks through: it takes a
//! statement plus JSON parameters and hands back rows as JSON maps.
//! [`Neo4jGraph`] is the production implementation; the connection pool is
//! opened once at startup and shared by every request.

use async_trait::async_trait;
use neo4rs::{query, Graph};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;
use tracing::{debug, info};

pub mod row;
pub mod schema;
pub mod talent;

pub use row::{params, Params, Row};

use row::json_to_bolt;
use schema::{VectorIndex, LOOKUP_INDEXES};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),

    #[error("Row decode error: {0}")]
    Decode(String),

    #[error("Query failed: {0}")]
    Query(String),
}

impl GraphError {
    /// True when the failure only says the schema object is already there.
    pub fn is_already_exists(&self) -> bool {
        let message = self.to_string().to_lowercase();
        message.contains("already exists") || message.contains("equivalentschemarulealreadyexists")
    }
}

/// Executes statements against a property graph store.
#[async_trait]
pub trait GraphAccessor: Send + Sync {
    /// Runs a statement and collects every result row in order.
    async fn query(&self, statement: &str, params: Params) -> Result<Vec<Row>, GraphError>;

    /// Runs a statement whose results are not needed.
    async fn run(&self, statement: &str, params: Params) -> Result<(), GraphError>;
}

/// Neo4j-backed [`GraphAccessor`].
#[derive(Clone)]
pub struct Neo4jGraph {
    graph: Graph,
}

impl Neo4jGraph {
    pub async fn connect(uri: &str, username: &str, password: &str) -> Result<Self, GraphError> {
        info!("Connecting to Neo4j at {uri}");
        let graph = Graph::new(uri, username, password).await?;
        info!("Neo4j connection pool established");
        Ok(Self { graph })
    }

    fn build_query(statement: &str, params: Params) -> neo4rs::Query {
        params
            .into_iter()
            .fold(query(statement), |q, (key, value)| {
                q.param(&key, json_to_bolt(value))
            })
    }
}

#[async_trait]
impl GraphAccessor for Neo4jGraph {
    async fn query(&self, statement: &str, params: Params) -> Result<Vec<Row>, GraphError> {
        debug!("Executing query: {statement}");
        let mut stream = self
            .graph
            .execute(Self::build_query(statement, params))
            .await?;

        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            let data: Map<String, JsonValue> = row
                .to()
                .map_err(|e| GraphError::Decode(e.to_string()))?;
            rows.push(Row::new(data));
        }
        Ok(rows)
    }

    async fn run(&self, statement: &str, params: Params) -> Result<(), GraphError> {
        debug!("Running statement: {statement}");
        self.graph.run(Self::build_query(statement, params)).await?;
        Ok(())
    }
}

/// Creates the lookup and vector indexes. Safe to call on every startup.
pub async fn ensure_indexes(graph: &dyn GraphAccessor) -> Result<(), GraphError> {
    for statement in LOOKUP_INDEXES {
        graph.run(statement, Params::new()).await?;
    }

    for index in VectorIndex::ALL {
        match graph.run(&index.create_statement(), Params::new()).await {
            Ok(()) => info!("Created vector index {}", index.name()),
            Err(e) if e.is_already_exists() => {
                debug!("Vector index {} already exists", index.name())
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records statements; vector-index creation fails with the given message.
    struct RecordingGraph {
        statements: Mutex<Vec<String>>,
        vector_failure: Option<&'static str>,
    }

    impl RecordingGraph {
        fn new(vector_failure: Option<&'static str>) -> Self {
            Self {
                statements: Mutex::new(Vec::new()),
                vector_failure,
            }
        }
    }

    #[async_trait]
    impl GraphAccessor for RecordingGraph {
        async fn query(&self, _statement: &str, _params: Params) -> Result<Vec<Row>, GraphError> {
            Ok(Vec::new())
        }

        async fn run(&self, statement: &str, _params: Params) -> Result<(), GraphError> {
            self.statements.lock().unwrap().push(statement.to_string());
            match self.vector_failure {
                Some(msg) if statement.starts_with("CALL db.index.vector") => {
                    Err(GraphError::Query(msg.to_string()))
                }
                _ => Ok(()),
            }
        }
    }

    #[tokio::test]
    async fn test_ensure_indexes_issues_all_statements() {
        let graph = RecordingGraph::new(None);
        ensure_indexes(&graph).await.unwrap();

        let statements = graph.statements.lock().unwrap();
        assert_eq!(statements.len(), 5);
        assert!(statements[0].contains("(p:Person) ON (p.email)"));
        assert!(statements[4].contains("job_vector_index"));
    }

    #[tokio::test]
    async fn test_ensure_indexes_tolerates_existing_vector_index() {
        let graph = RecordingGraph::new(Some(
            "Neo.ClientError.Schema.EquivalentSchemaRuleAlreadyExists: An equivalent index already exists",
        ));
        assert!(ensure_indexes(&graph).await.is_ok());
        assert_eq!(graph.statements.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_ensure_indexes_propagates_other_failures() {
        let graph = RecordingGraph::new(Some("There is no procedure with the name"));
        let err = ensure_indexes(&graph).await.unwrap_err();
        assert!(!err.is_already_exists());
    }
}
