use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Reddit API error: {0}")]
    RedditApi(#[from] RedditApiError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Error, Debug, Clone)]
pub enum RedditApiError {
    #[error("Rate limit exceeded. Retry after {retry_after} seconds")]
    RateLimitExceeded { retry_after: u64 },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },

    #[error("Server error: {status_code}")]
    ServerError { status_code: u16 },
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Place not found: {place_id}")]
    PlaceNotFound { place_id: String },

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable not set: {var_name}")]
    MissingEnvironmentVariable { var_name: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}
