//! Candidate scoring: pure functions over job requirements and candidate
//! profiles.
//!
//! Algorithm, per candidate:
//! 1. skill_match      = |candidate ∩ required| / |required|
//! 2. education_score  = mean degree tier (PhD 1.0, Master 0.8, Bachelor 0.6, other 0.3),
//!                       0 with no education records
//! 3. experience_score = min(1, total role years / 10)
//! 4. overall_match    = Σ weight × factor
//!
//! A job without required skills yields no results.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::talent::{
    CandidateProfile, EducationRecord, JobDetails, RoleRecord, ScoredCandidate, SkillMatch,
};

use super::weights::ScoringWeights;

/// Maximum number of candidates returned by [`rank_candidates`].
pub const MAX_RANKED_CANDIDATES: usize = 20;

/// Years of experience at which the experience factor saturates.
pub const EXPERIENCE_CAP_YEARS: f64 = 10.0;

/// Score for one degree string. Matching is case-insensitive on the degree name.
pub fn degree_tier(degree: Option<&str>) -> f64 {
    let Some(degree) = degree else {
        return 0.3;
    };
    let normalized = degree.to_lowercase().replace('.', "");
    if normalized.contains("phd") {
        1.0
    } else if normalized.contains("master") {
        0.8
    } else if normalized.contains("bachelor") {
        0.6
    } else {
        0.3
    }
}

pub fn education_score(education: &[EducationRecord]) -> f64 {
    let total: f64 = education
        .iter()
        .map(|e| degree_tier(e.degree.as_deref()))
        .sum();
    total / education.len().max(1) as f64
}

pub fn total_years(roles: &[RoleRecord]) -> f64 {
    roles.iter().filter_map(|r| r.years).sum()
}

pub fn experience_score(total_years: f64) -> f64 {
    (total_years.max(0.0) / EXPERIENCE_CAP_YEARS).min(1.0)
}

/// Distinct required skills, in first-seen order.
fn distinct_skills(skills: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(String::as_str)
        .filter(|s| seen.insert(*s))
        .collect()
}

/// Number of required skills the candidate has. `required` must be distinct.
fn matching_skill_count(required: &[&str], candidate_skills: &[String]) -> usize {
    let owned: HashSet<&str> = candidate_skills.iter().map(String::as_str).collect();
    required.iter().filter(|s| owned.contains(*s)).count()
}

/// Fraction of the job's required skills the candidate has.
/// `None` when the job requires nothing.
pub fn skill_match(required_skills: &[String], candidate_skills: &[String]) -> Option<f64> {
    let required = distinct_skills(required_skills);
    if required.is_empty() {
        return None;
    }
    Some(matching_skill_count(&required, candidate_skills) as f64 / required.len() as f64)
}

pub fn overall_match(
    weights: &ScoringWeights,
    skill_match: f64,
    education_score: f64,
    experience_score: f64,
) -> f64 {
    weights.skill * skill_match
        + weights.education * education_score
        + weights.experience * experience_score
}

pub fn score_candidate(
    required_skills: &[String],
    candidate: &CandidateProfile,
    weights: &ScoringWeights,
) -> Option<ScoredCandidate> {
    let skill_match = skill_match(required_skills, &candidate.skills)?;
    let education_score = education_score(&candidate.education);
    let experience_score = experience_score(total_years(&candidate.roles));

    Some(ScoredCandidate {
        name: candidate.name.clone(),
        email: candidate.email.clone(),
        skill_match,
        education_score,
        experience_score,
        overall_match: overall_match(weights, skill_match, education_score, experience_score),
    })
}

/// Scores every candidate against the job, best first, at most
/// [`MAX_RANKED_CANDIDATES`]. Ties are ordered by email.
pub fn rank_candidates(
    job: &JobDetails,
    candidates: &[CandidateProfile],
    weights: &ScoringWeights,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .filter_map(|c| score_candidate(&job.required_skills, c, weights))
        .collect();

    scored.sort_by(|a, b| {
        b.overall_match
            .partial_cmp(&a.overall_match)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.email.cmp(&b.email))
    });
    scored.truncate(MAX_RANKED_CANDIDATES);
    scored
}

/// Candidates sharing at least one required skill whose ratio reaches
/// `min_skill_match`, best ratio first, at most `limit`.
pub fn filter_by_skill_match(
    job: &JobDetails,
    candidates: &[CandidateProfile],
    min_skill_match: f64,
    limit: usize,
) -> Vec<SkillMatch> {
    let required = distinct_skills(&job.required_skills);
    if required.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<SkillMatch> = candidates
        .iter()
        .filter_map(|c| {
            let matching = matching_skill_count(&required, &c.skills);
            let ratio = matching as f64 / required.len() as f64;
            (matching > 0 && ratio >= min_skill_match).then(|| SkillMatch {
                name: c.name.clone(),
                email: c.email.clone(),
                matching_skills: matching,
                total_required_skills: required.len(),
                skill_match_ratio: ratio,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.skill_match_ratio
            .partial_cmp(&a.skill_match_ratio)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.email.cmp(&b.email))
    });
    matches.truncate(limit);
    matches
}
