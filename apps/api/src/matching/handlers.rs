//! Axum route handlers for candidate matching and graph lookups.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{AppPath, AppQuery};
use crate::matching::weights::ScoringWeights;
use crate::matching::{
    find_matching_candidates, score_candidates, semantic_job_match, DEFAULT_MATCH_LIMIT,
    DEFAULT_MIN_SKILL_MATCH, DEFAULT_SEMANTIC_TOP_K,
};
use crate::models::talent::{
    CandidateProfile, JobDetails, ScoredCandidate, SemanticMatch, SkillMatch,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchCandidatesQuery {
    pub job_title: String,
    pub skill_weight: Option<f64>,
    pub education_weight: Option<f64>,
    pub experience_weight: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MatchCandidatesResponse {
    pub job_title: String,
    pub matches: Vec<ScoredCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct FindCandidatesQuery {
    pub job_title: String,
    pub min_skill_match: Option<f64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FindCandidatesResponse {
    pub job_title: String,
    pub min_skill_match: f64,
    pub matches: Vec<SkillMatch>,
}

#[derive(Debug, Deserialize)]
pub struct SemanticMatchQuery {
    pub job_title: String,
    pub query: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SemanticMatchResponse {
    pub job_title: String,
    pub query: String,
    pub matches: Vec<SemanticMatch>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: JobDetails,
}

#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub candidate: CandidateProfile,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /match-candidates/?job_title=...
///
/// Weighted skill/education/experience ranking. Weights default to 0.5/0.2/0.3.
pub async fn handle_match_candidates(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MatchCandidatesQuery>,
) -> Result<Json<MatchCandidatesResponse>, AppError> {
    let weights = ScoringWeights::with_overrides(
        params.skill_weight,
        params.education_weight,
        params.experience_weight,
    );
    let matches = score_candidates(state.store.as_ref(), &params.job_title, &weights).await?;

    Ok(Json(MatchCandidatesResponse {
        job_title: params.job_title,
        matches,
    }))
}

/// GET /find-candidates/?job_title=...&min_skill_match=0.6&limit=10
pub async fn handle_find_candidates(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<FindCandidatesQuery>,
) -> Result<Json<FindCandidatesResponse>, AppError> {
    let min_skill_match = params.min_skill_match.unwrap_or(DEFAULT_MIN_SKILL_MATCH);
    let matches = find_matching_candidates(
        state.store.as_ref(),
        &params.job_title,
        min_skill_match,
        params.limit.unwrap_or(DEFAULT_MATCH_LIMIT),
    )
    .await?;

    Ok(Json(FindCandidatesResponse {
        job_title: params.job_title,
        min_skill_match,
        matches,
    }))
}

/// GET /semantic-match/?job_title=...&query=...&top_k=5
pub async fn handle_semantic_match(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SemanticMatchQuery>,
) -> Result<Json<SemanticMatchResponse>, AppError> {
    let matches = semantic_job_match(
        state.store.as_ref(),
        state.embedder.as_ref(),
        &params.job_title,
        &params.query,
        params.top_k.unwrap_or(DEFAULT_SEMANTIC_TOP_K),
    )
    .await?;

    Ok(Json(SemanticMatchResponse {
        job_title: params.job_title,
        query: params.query,
        matches,
    }))
}

/// GET /jobs/:title
pub async fn handle_get_job(
    State(state): State<AppState>,
    AppPath(title): AppPath<String>,
) -> Result<Json<JobResponse>, AppError> {
    let job = state
        .store
        .job_details(&title)
        .await?
        .ok_or_else(|| AppError::DataAbsent(format!("Job '{title}' not found")))?;
    Ok(Json(JobResponse { job }))
}

/// GET /candidates/:email
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    AppPath(email): AppPath<String>,
) -> Result<Json<CandidateResponse>, AppError> {
    let candidate = state
        .store
        .candidate_profile(&email)
        .await?
        .ok_or_else(|| AppError::DataAbsent(format!("Candidate '{email}' not found")))?;
    Ok(Json(CandidateResponse { candidate }))
}
