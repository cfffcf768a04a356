use crate::error::ConfigError;
use std::env;

pub const DEFAULT_USER_AGENT: &str = "citylens/0.1 (city content relevance engine)";
pub const DEFAULT_SUBREDDIT: &str = "boston";
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Environment configuration for a batch run.
///
/// The connection string and the embedding API key are required: a missing
/// value is a fatal startup condition and no partial run is attempted.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub embedding_api_key: String,
    pub user_agent: String,
    pub subreddit: String,
    pub page_limit: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require_var("DATABASE_URL")?;
        let embedding_api_key = require_var("EMBEDDING_API_KEY")?;

        let user_agent =
            env::var("CITYLENS_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let subreddit =
            env::var("CITYLENS_SUBREDDIT").unwrap_or_else(|_| DEFAULT_SUBREDDIT.to_string());

        let page_limit = match env::var("CITYLENS_PAGE_LIMIT") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "CITYLENS_PAGE_LIMIT".to_string(),
                    value: raw,
                })?,
            Err(_) => DEFAULT_PAGE_LIMIT,
        };

        Ok(Self {
            database_url,
            embedding_api_key,
            user_agent,
            subreddit,
            page_limit,
        })
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvironmentVariable {
            var_name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_var_rejects_blank() {
        env::set_var("CITYLENS_TEST_BLANK", "   ");
        assert!(require_var("CITYLENS_TEST_BLANK").is_err());
        env::remove_var("CITYLENS_TEST_BLANK");

        assert!(require_var("CITYLENS_TEST_UNSET").is_err());
    }
}
