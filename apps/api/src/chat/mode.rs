use serde::{Deserialize, Serialize};

pub const INVALID_MODE_MESSAGE: &str =
    "Invalid mode. Please choose 'resume-job', 'job-match', or 'info'.";

/// Which component a `/chat` message is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatMode {
    /// Free-form question for the HR assistant.
    ResumeJob,
    /// The text is a job title to rank candidates for.
    JobMatch,
    /// The text is a question answered by querying the graph.
    Info,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_modes_parse() {
        for (raw, mode) in [
            ("\"resume-job\"", ChatMode::ResumeJob),
            ("\"job-match\"", ChatMode::JobMatch),
            ("\"info\"", ChatMode::Info),
        ] {
            assert_eq!(serde_json::from_str::<ChatMode>(raw).unwrap(), mode);
        }
    }

    #[test]
    fn test_unrecognized_mode_is_unknown() {
        let mode: ChatMode = serde_json::from_str("\"summarize\"").unwrap();
        assert_eq!(mode, ChatMode::Unknown);
    }
}
