use std::time::Duration;

use thiserror::Error;

/// Why a provider could not produce a result.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("http client setup failed: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned no content")]
    EmptyContent,

    #[error("malformed provider response: {0}")]
    Malformed(String),
}
