//! Candidate matching: weighted scoring, skill-overlap filtering and
//! semantic search, each resolved against the talent graph.

use tracing::debug;

use crate::embedding::{similarity_search, Embedder};
use crate::errors::AppError;
use crate::graph::schema::VectorIndex;
use crate::graph::talent::TalentStore;
use crate::graph::GraphError;
use crate::models::talent::{ScoredCandidate, SemanticMatch, SkillMatch};

pub mod handlers;
pub mod scoring;
pub mod weights;

use scoring::{filter_by_skill_match, rank_candidates};
use weights::ScoringWeights;

pub const DEFAULT_MIN_SKILL_MATCH: f64 = 0.6;
pub const DEFAULT_MATCH_LIMIT: usize = 10;
pub const DEFAULT_SEMANTIC_TOP_K: usize = 5;

/// Ranks every candidate for `job_title` by the weighted multi-factor score.
/// An unknown job, or one with no required skills, yields no candidates.
pub async fn score_candidates(
    store: &dyn TalentStore,
    job_title: &str,
    weights: &ScoringWeights,
) -> Result<Vec<ScoredCandidate>, GraphError> {
    if !weights.is_unit_sum() {
        debug!("Scoring weights sum to {}, applying as given", weights.sum());
    }

    let Some(job) = store.job_details(job_title).await? else {
        debug!("Job '{job_title}' not found");
        return Ok(Vec::new());
    };
    if job.required_skills.is_empty() {
        debug!("Job '{job_title}' has no required skills");
        return Ok(Vec::new());
    }

    let candidates = store.candidate_profiles().await?;
    Ok(rank_candidates(&job, &candidates, weights))
}

/// Skill-overlap-only filter: the cheaper matching path.
pub async fn find_matching_candidates(
    store: &dyn TalentStore,
    job_title: &str,
    min_skill_match: f64,
    limit: usize,
) -> Result<Vec<SkillMatch>, GraphError> {
    let Some(job) = store.job_details(job_title).await? else {
        return Ok(Vec::new());
    };
    let candidates = store.candidate_profiles().await?;
    Ok(filter_by_skill_match(
        &job,
        &candidates,
        min_skill_match,
        limit,
    ))
}

/// Candidates whose embeddings sit closest to the job context plus `query`.
pub async fn semantic_job_match(
    store: &dyn TalentStore,
    embedder: &dyn Embedder,
    job_title: &str,
    query: &str,
    top_k: usize,
) -> Result<Vec<SemanticMatch>, AppError> {
    let Some(job) = store.job_details(job_title).await? else {
        return Ok(Vec::new());
    };

    let augmented = format!(
        "Job Title: {}\nJob Description: {}\nRequired Skills: {}\nQuery: {}",
        job.title,
        job.description.as_deref().unwrap_or_default(),
        job.required_skills.join(", "),
        query
    );

    let neighbors =
        similarity_search(embedder, store, &augmented, VectorIndex::Person, top_k).await?;

    let mut matches = Vec::with_capacity(neighbors.len());
    for neighbor in neighbors {
        if let Some(candidate) = store.candidate_profile(&neighbor.id).await? {
            matches.push(SemanticMatch {
                candidate,
                similarity_score: 1.0 - neighbor.distance,
            });
        }
    }
    Ok(matches)
}
