//! tagsum-core
//!
//! Core primitives for tagsum:
//! - the AI extraction result model
//! - validation rules mirroring the tagged-summaries program's limits
//! - explicit, serializable configuration
//! - transaction hash helpers and listing order helpers
//!
//! Nothing in this crate performs network I/O or depends on Solana types.

pub mod config;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod ordering;
pub mod text;
pub mod validation;

pub use crate::errors::{TagsumError, TagsumResult};

/// Limits enforced by the deployed program. Client limits may be tighter,
/// never looser.
pub mod limits {
    pub const MAX_TAGS: usize = 15;
    pub const MAX_SUMMARY_BYTES: usize = 800;
    pub const HASH_LEN: usize = 64;
    pub const MAX_CONFIDENCE: i64 = 100;
}

/// Default endpoints and identities.
pub mod defaults {
    /// Deployed tagged-summaries program (devnet).
    pub const PROGRAM_ID: &str = "F8qn46JxkYB3koH2tZc38qceCK3PHQ5PafaJR6u5AyD7";
    pub const RPC_URL: &str = "https://api.devnet.solana.com";
    pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
    pub const GROQ_MODEL: &str = "llama-3.3-70b-versatile";
    pub const TIMEOUT_MS: u64 = 30_000;
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{CoreConfig, ExtractionConfig, LimitsConfig, NetworkConfig};
    pub use crate::model::AiProcessingResult;
    pub use crate::validation::{
        validate_all, validate_result, validate_transaction_hash, ValidationError,
    };
    pub use crate::{TagsumError, TagsumResult};
}
