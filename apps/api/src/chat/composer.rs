//! Conversational Response Composer: grounds an LLM answer in job and
//! candidate context pulled from the graph.
//!
//! Missing context never fails a request: an unknown job, an empty ranking or
//! an unreachable graph all fall back to placeholder text, and the model is
//! told to answer "I don't know" when nothing matches.

use std::fmt::Write as _;

use tracing::warn;

use crate::chat::prompts::{
    ASSISTANT_SYSTEM_TEMPLATE, NO_CANDIDATES_PLACEHOLDER, NO_JOB_PLACEHOLDER,
};
use crate::errors::AppError;
use crate::graph::talent::TalentStore;
use crate::llm_client::prompts::{render, NO_MATCH_INSTRUCTION};
use crate::llm_client::{ChatMessage, ChatModel};
use crate::matching::scoring::rank_candidates;
use crate::matching::weights::ScoringWeights;
use crate::models::talent::JobDetails;

/// How many ranked candidates are described to the model.
pub const CONTEXT_CANDIDATES: usize = 5;

/// Context blocks interpolated into the system prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatContext {
    pub job_details: String,
    pub candidate_matches: String,
}

impl Default for ChatContext {
    fn default() -> Self {
        Self {
            job_details: NO_JOB_PLACEHOLDER.to_string(),
            candidate_matches: NO_CANDIDATES_PLACEHOLDER.to_string(),
        }
    }
}

fn render_job(job: &JobDetails) -> String {
    format!(
        "Title: {}\nDescription: {}\nRequired Skills: {}",
        job.title,
        job.description.as_deref().unwrap_or_default(),
        job.required_skills.join(", ")
    )
}

/// Gathers whatever context the graph can provide for `job_title`.
pub async fn build_context(store: &dyn TalentStore, job_title: Option<&str>) -> ChatContext {
    let mut context = ChatContext::default();
    let Some(job_title) = job_title.filter(|t| !t.trim().is_empty()) else {
        return context;
    };

    let job = match store.job_details(job_title).await {
        Ok(Some(job)) => job,
        Ok(None) => return context,
        Err(e) => {
            warn!("Job lookup for '{job_title}' failed, answering without it: {e}");
            return context;
        }
    };
    context.job_details = render_job(&job);
    if job.required_skills.is_empty() {
        return context;
    }

    let profiles = match store.candidate_profiles().await {
        Ok(profiles) => profiles,
        Err(e) => {
            warn!("Candidate lookup for '{job_title}' failed, answering without it: {e}");
            return context;
        }
    };

    let ranked = rank_candidates(&job, &profiles, &ScoringWeights::default());
    let mut rendered = String::new();
    for (i, candidate) in ranked.iter().take(CONTEXT_CANDIDATES).enumerate() {
        let skills = profiles
            .iter()
            .find(|p| p.email == candidate.email)
            .map(|p| p.skills.join(", "))
            .unwrap_or_default();
        let _ = write!(
            rendered,
            "\n--- Candidate {}: {} ---\nMatch Score: {:.2}\nSkills: {}\n",
            i + 1,
            candidate.name,
            candidate.overall_match,
            skills
        );
    }
    if !rendered.is_empty() {
        context.candidate_matches = rendered;
    }

    context
}

pub fn build_messages(user_query: &str, context: &ChatContext) -> Vec<ChatMessage> {
    let system = render(
        ASSISTANT_SYSTEM_TEMPLATE,
        &[
            ("job_details", context.job_details.as_str()),
            ("candidate_matches", context.candidate_matches.as_str()),
            ("no_match_instruction", NO_MATCH_INSTRUCTION),
        ],
    );
    vec![ChatMessage::system(system), ChatMessage::user(user_query)]
}

/// Answers `user_query`, grounded in `job_title`'s details and top candidates
/// when a job is given.
pub async fn answer(
    llm: &dyn ChatModel,
    store: &dyn TalentStore,
    user_query: &str,
    job_title: Option<&str>,
) -> Result<String, AppError> {
    let context = build_context(store, job_title).await;
    let reply = llm.complete(&build_messages(user_query, &context)).await?;
    Ok(reply)
}
