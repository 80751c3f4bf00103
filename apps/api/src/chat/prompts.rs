// Prompt templates for the HR chat assistant.

/// System prompt template. Replace `{job_details}`, `{candidate_matches}`
/// and `{no_match_instruction}` before sending.
pub const ASSISTANT_SYSTEM_TEMPLATE: &str = "\
You are an AI HR assistant specialized in candidate-job matching. Analyze the candidate \
profiles and job requirements to provide accurate matches and insights.

Job Details: {job_details}

Candidate Matches: {candidate_matches}

Based on this graph database information, provide a detailed, professional analysis. \
{no_match_instruction}";

pub const NO_JOB_PLACEHOLDER: &str = "No job specified";

pub const NO_CANDIDATES_PLACEHOLDER: &str = "No candidates found";
