use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable '{0}' is not set")]
    Missing(&'static str),

    #[error("Environment variable '{key}' is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration loaded from environment variables.
/// Startup aborts if any required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_username: String,
    pub neo4j_password: String,
    /// Embeddings (OpenAI).
    pub openai_api_key: String,
    /// Chat completions (Groq).
    pub groq_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub cors_allowed_origins: Vec<String>,
    /// Embed graph nodes that have no vector yet before serving.
    pub embedding_backfill: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            neo4j_uri: require_env("NEO4J_URI")?,
            neo4j_username: require_env("NEO4J_USERNAME")?,
            neo4j_password: require_env("NEO4J_PASSWORD")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            groq_api_key: require_env("GROQ_API_KEY")?,
            port: match std::env::var("PORT") {
                Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                    key: "PORT",
                    reason: e.to_string(),
                })?,
                Err(_) => DEFAULT_PORT,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cors_allowed_origins: parse_origins(
                &std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string()),
            ),
            embedding_backfill: match std::env::var("EMBEDDING_BACKFILL") {
                Ok(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                    key: "EMBEDDING_BACKFILL",
                    reason: format!("expected true/false, got '{raw}'"),
                })?,
                Err(_) => true,
            },
        })
    }
}

fn require_env(key: &'static str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        let origins = parse_origins("http://localhost:3000, https://app.example.com ,");
        assert_eq!(
            origins,
            vec!["http://localhost:3000", "https://app.example.com"]
        );
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_require_env_reports_missing_key() {
        let err = require_env("RESUME_MATCH_TEST_UNSET_VARIABLE").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Missing("RESUME_MATCH_TEST_UNSET_VARIABLE")
        ));
        assert!(err.to_string().contains("RESUME_MATCH_TEST_UNSET_VARIABLE"));
    }
}
