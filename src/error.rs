use thiserror::Error;

/// Failures raised by a document store implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Malformed document in {collection}: {reason}")]
    Decode { collection: String, reason: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Main error type for the aggregation core
#[derive(Error, Debug)]
pub enum FeedError {
    /// Bad, out-of-range or malformed input. Never retried.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Well-formed request with no matching entity
    #[error("Not found: {0}")]
    NotFound(String),

    /// A batch fetch failed; the whole aggregation is abandoned
    #[error("Dependency failure: {0}")]
    Dependency(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FeedError {
    pub fn validation(msg: impl Into<String>) -> Self {
        FeedError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        FeedError::NotFound(msg.into())
    }

    /// Stable machine-readable code surfaced to clients
    pub fn code(&self) -> &'static str {
        match self {
            FeedError::Validation(_) => "VALIDATION_ERROR",
            FeedError::NotFound(_) => "NOT_FOUND",
            FeedError::Dependency(_) => "DEPENDENCY_ERROR",
            FeedError::Config(_) => "CONFIG_ERROR",
            FeedError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message. Dependency details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            FeedError::Validation(msg) | FeedError::NotFound(msg) => msg.clone(),
            FeedError::Dependency(_) => "Upstream data source failed".to_string(),
            FeedError::Config(_) | FeedError::Internal(_) => "Internal error".to_string(),
        }
    }

    pub fn is_client_fault(&self) -> bool {
        matches!(self, FeedError::Validation(_) | FeedError::NotFound(_))
    }
}

/// Result type alias for FeedError
pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(FeedError::validation("x").code(), "VALIDATION_ERROR");
        assert_eq!(FeedError::not_found("x").code(), "NOT_FOUND");
        let dep: FeedError = StoreError::Unavailable("down".into()).into();
        assert_eq!(dep.code(), "DEPENDENCY_ERROR");
        assert!(!dep.is_client_fault());
        assert_eq!(dep.public_message(), "Upstream data source failed");
    }
}
