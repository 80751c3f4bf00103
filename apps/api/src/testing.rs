//! In-memory stand-ins for the graph, the embedder and the chat model.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::embedding::{Embedder, EmbeddingError};
use crate::graph::schema::{VectorIndex, EMBEDDING_DIMENSIONS};
use crate::graph::talent::{PendingEmbedding, SimilarNode, TalentStore};
use crate::graph::{GraphError, Row};
use crate::llm_client::{ChatMessage, ChatModel, LlmError};
use crate::models::talent::{CandidateProfile, EducationRecord, JobDetails, RoleRecord};
use crate::state::AppState;

#[derive(Default)]
pub struct InMemoryTalentStore {
    jobs: Vec<JobDetails>,
    candidates: Vec<CandidateProfile>,
    similar: Vec<SimilarNode>,
    pending: Vec<PendingEmbedding>,
    /// `Err(message)` makes `execute_raw` fail with that message.
    raw_result: Option<Result<Vec<Row>, String>>,
    /// Makes every read fail, to exercise degraded paths.
    unavailable: bool,
    raw_statements: Mutex<Vec<String>>,
    embedded: Mutex<Vec<String>>,
    profile_lookups: AtomicUsize,
}

impl InMemoryTalentStore {
    pub fn with_job(mut self, title: &str, description: &str, skills: &[&str]) -> Self {
        self.jobs.push(JobDetails {
            title: title.to_string(),
            description: Some(description.to_string()),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn with_candidate(mut self, candidate: CandidateProfile) -> Self {
        self.candidates.push(candidate);
        self
    }

    pub fn with_similar(mut self, hits: Vec<(&str, f64)>) -> Self {
        self.similar = hits
            .into_iter()
            .map(|(id, score)| SimilarNode {
                id: id.to_string(),
                score,
            })
            .collect();
        self
    }

    pub fn with_pending(mut self, nodes: Vec<(&str, &str)>) -> Self {
        self.pending = nodes
            .into_iter()
            .map(|(id, text)| PendingEmbedding {
                id: id.to_string(),
                text: text.to_string(),
            })
            .collect();
        self
    }

    pub fn with_raw_rows(mut self, rows: Vec<JsonValue>) -> Self {
        let rows = rows
            .into_iter()
            .map(|v| match v {
                JsonValue::Object(map) => Row::new(map),
                other => panic!("expected object, got {other}"),
            })
            .collect();
        self.raw_result = Some(Ok(rows));
        self
    }

    pub fn with_raw_failure(mut self, message: &str) -> Self {
        self.raw_result = Some(Err(message.to_string()));
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn raw_statements(&self) -> Vec<String> {
        self.raw_statements.lock().unwrap().clone()
    }

    /// Calls to `candidate_profile` (single-candidate reads) so far.
    pub fn single_profile_lookups(&self) -> usize {
        self.profile_lookups.load(Ordering::SeqCst)
    }

    pub fn embedded_ids(&self) -> Vec<String> {
        self.embedded.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), GraphError> {
        if self.unavailable {
            return Err(GraphError::Query("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TalentStore for InMemoryTalentStore {
    async fn job_details(&self, title: &str) -> Result<Option<JobDetails>, GraphError> {
        self.check_available()?;
        Ok(self.jobs.iter().find(|j| j.title == title).cloned())
    }

    async fn candidate_profile(
        &self,
        email: &str,
    ) -> Result<Option<CandidateProfile>, GraphError> {
        self.profile_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.candidates.iter().find(|c| c.email == email).cloned())
    }

    async fn candidate_profiles(&self) -> Result<Vec<CandidateProfile>, GraphError> {
        self.check_available()?;
        Ok(self.candidates.clone())
    }

    async fn execute_raw(&self, statement: &str) -> Result<Vec<Row>, GraphError> {
        self.raw_statements
            .lock()
            .unwrap()
            .push(statement.to_string());
        match &self.raw_result {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(message)) => Err(GraphError::Query(message.clone())),
            None => Ok(Vec::new()),
        }
    }

    async fn vector_query(
        &self,
        _index: VectorIndex,
        _embedding: &[f32],
        k: usize,
    ) -> Result<Vec<SimilarNode>, GraphError> {
        self.check_available()?;
        Ok(self.similar.iter().take(k).cloned().collect())
    }

    async fn nodes_missing_embedding(
        &self,
        _index: VectorIndex,
    ) -> Result<Vec<PendingEmbedding>, GraphError> {
        self.check_available()?;
        Ok(self.pending.clone())
    }

    async fn set_embedding(
        &self,
        _index: VectorIndex,
        id: &str,
        _embedding: &[f32],
    ) -> Result<(), GraphError> {
        self.embedded.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

/// Returns a constant vector of the configured length.
pub struct FixedEmbedder {
    dimensions: usize,
}

impl FixedEmbedder {
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for FixedEmbedder {
    fn default() -> Self {
        Self::with_dimensions(EMBEDDING_DIMENSIONS)
    }
}

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(vec![0.1; self.dimensions])
    }
}

/// Replies from a queue (falling back to a default reply) and records every
/// prompt it receives.
#[derive(Default)]
pub struct ScriptedChatModel {
    replies: Mutex<VecDeque<Result<String, u16>>>,
    default_reply: String,
    prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedChatModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            default_reply: reply.to_string(),
            ..Self::default()
        }
    }

    /// Queues an API failure with the given status for the next call.
    pub fn then_fail(self, status: u16) -> Self {
        self.replies.lock().unwrap().push_back(Err(status));
        self
    }

    pub fn prompts(&self) -> Vec<Vec<ChatMessage>> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(messages.to_vec());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(status)) => Err(LlmError::Api {
                status,
                message: "scripted failure".to_string(),
            }),
            None => Ok(self.default_reply.clone()),
        }
    }
}

pub fn profile(
    name: &str,
    email: &str,
    skills: &[&str],
    degrees: &[&str],
    years: &[f64],
) -> CandidateProfile {
    CandidateProfile {
        name: name.to_string(),
        email: email.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        education: degrees
            .iter()
            .map(|d| EducationRecord {
                degree: Some(d.to_string()),
                institution: None,
                graduation_year: None,
            })
            .collect(),
        roles: years
            .iter()
            .map(|y| RoleRecord {
                title: None,
                company: None,
                years: Some(*y),
                description: None,
            })
            .collect(),
        projects: vec![],
    }
}

/// The "Data Scientist" fixture: B has every required skill, A two of three.
pub fn data_science_store() -> InMemoryTalentStore {
    InMemoryTalentStore::default()
        .with_job(
            "Data Scientist",
            "Builds statistical models",
            &["python", "sql", "statistics"],
        )
        .with_candidate(profile(
            "Alice",
            "alice@example.com",
            &["python", "sql"],
            &["Master of Science"],
            &[4.0],
        ))
        .with_candidate(profile(
            "Bob",
            "bob@example.com",
            &["python", "sql", "statistics"],
            &["PhD Statistics"],
            &[6.0, 6.0],
        ))
}

pub fn test_state(store: InMemoryTalentStore, llm: ScriptedChatModel) -> AppState {
    AppState {
        store: Arc::new(store),
        llm: Arc::new(llm),
        embedder: Arc::new(FixedEmbedder::default()),
    }
}
