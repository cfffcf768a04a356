use crate::error::*;
use std::time::Duration;
use tracing::warn;

pub trait ErrorExt {
    fn log_warn(&self) -> &Self;
    fn is_retryable(&self) -> bool;
    fn retry_after(&self) -> Option<Duration>;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            CoreError::RedditApi(e) => e.is_retryable(),
            CoreError::Network(_) => true,
            CoreError::Database(DatabaseError::ConnectionFailed { .. }) => true,
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            CoreError::RedditApi(RedditApiError::RateLimitExceeded { retry_after }) => {
                Some(Duration::from_secs(*retry_after))
            }
            _ => None,
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::RedditApi(_) => "REDDIT_API",
            CoreError::Database(_) => "DATABASE",
            CoreError::Config(_) => "CONFIG",
            CoreError::Serialization(_) => "SERIALIZATION",
            CoreError::Network(_) => "NETWORK",
        }
        .to_string()
    }
}

impl RedditApiError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RedditApiError::RateLimitExceeded { .. }
                | RedditApiError::ServerError { .. }
                | RedditApiError::RequestTimeout
        )
    }
}
