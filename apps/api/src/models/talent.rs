use serde::{Deserialize, Serialize};

/// A job posting and the skills it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub title: Option<String>,
    pub company: Option<String>,
    /// Years spent in the role; fractional values are allowed.
    pub years: Option<f64>,
    pub description: Option<String>,
}

/// Everything the graph knows about one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationRecord>,
    #[serde(default)]
    pub roles: Vec<RoleRecord>,
    #[serde(default)]
    pub projects: Vec<String>,
}

/// A candidate ranked by the weighted multi-factor score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub name: String,
    pub email: String,
    pub skill_match: f64,
    pub education_score: f64,
    pub experience_score: f64,
    pub overall_match: f64,
}

/// A candidate ranked by skill overlap alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    pub name: String,
    pub email: String,
    pub matching_skills: usize,
    pub total_required_skills: usize,
    pub skill_match_ratio: f64,
}

/// A candidate surfaced by vector similarity to a job-plus-query text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticMatch {
    pub candidate: CandidateProfile,
    pub similarity_score: f64,
}
