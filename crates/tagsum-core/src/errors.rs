//! Error types for tagsum-core.
//!
//! Validation failures have their own enum (`crate::validation::ValidationError`)
//! because callers match on the exact rule that failed. Everything else in the
//! core crate reports through `TagsumError`.

use thiserror::Error;

/// Result alias used across tagsum-core.
pub type TagsumResult<T> = Result<T, TagsumError>;

#[derive(Debug, Error)]
pub enum TagsumError {
    /// A caller-supplied value is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration object failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An internal invariant was broken.
    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TagsumError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
}
