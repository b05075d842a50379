//! Configuration structures for tagsum.
//!
//! This module defines explicit, serializable configuration objects used by
//! higher-level components (chain client, extractor, CLI) to control limits,
//! network access and metadata extraction.
//!
//! The core crate itself does not read environment variables. All configuration
//! must be provided explicitly by the caller, either in code or through
//! [`CoreConfig::load`] on a JSON file the caller chose.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::errors::{TagsumError, TagsumResult};
use crate::limits;

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoreConfig {
    pub limits: LimitsConfig,
    pub network: NetworkConfig,
    pub extraction: ExtractionConfig,
}

impl CoreConfig {
    /// Load a configuration file. Missing fields fall back to defaults.
    ///
    /// The result is not validated: callers overlay their own overrides first
    /// and then run [`validate_config`] once.
    pub fn load<P: AsRef<Path>>(path: P) -> TagsumResult<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Client-side limits. These mirror the bounds the program enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LimitsConfig {
    pub max_tags: usize,
    /// Measured in UTF-8 bytes, as the program measures it.
    pub max_summary_bytes: usize,
    pub hash_len: usize,
    pub max_confidence: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tags: limits::MAX_TAGS,
            max_summary_bytes: limits::MAX_SUMMARY_BYTES,
            hash_len: limits::HASH_LEN,
            max_confidence: limits::MAX_CONFIDENCE,
        }
    }
}

/// RPC connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub commitment: Commitment,
    pub timeout_ms: u64,
    /// Base58 program id of the deployed tagged-summaries program.
    pub program_id: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: defaults::RPC_URL.to_string(),
            commitment: Commitment::Confirmed,
            timeout_ms: defaults::TIMEOUT_MS,
            program_id: defaults::PROGRAM_ID.to_string(),
        }
    }
}

/// Supported commitment levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

/// LLM extraction settings.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_ms: u64,
    /// Never serialized back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::GROQ_ENDPOINT.to_string(),
            model: defaults::GROQ_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: 500,
            timeout_ms: defaults::TIMEOUT_MS,
            api_key: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_ms", &self.timeout_ms)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &CoreConfig) -> TagsumResult<()> {
    let l = &cfg.limits;
    if l.max_tags == 0 || l.max_tags > limits::MAX_TAGS {
        return Err(TagsumError::invalid_config(format!(
            "max_tags must be within 1..={}",
            limits::MAX_TAGS
        )));
    }
    if l.max_summary_bytes == 0 || l.max_summary_bytes > limits::MAX_SUMMARY_BYTES {
        return Err(TagsumError::invalid_config(format!(
            "max_summary_bytes must be within 1..={}",
            limits::MAX_SUMMARY_BYTES
        )));
    }
    if l.hash_len != limits::HASH_LEN {
        return Err(TagsumError::invalid_config(format!(
            "hash_len is fixed by the program at {}",
            limits::HASH_LEN
        )));
    }
    if !(0..=limits::MAX_CONFIDENCE).contains(&l.max_confidence) {
        return Err(TagsumError::invalid_config(format!(
            "max_confidence must be within 0..={}",
            limits::MAX_CONFIDENCE
        )));
    }

    if cfg.network.rpc_url.trim().is_empty() {
        return Err(TagsumError::invalid_config("rpc_url must not be empty"));
    }
    if cfg.network.program_id.trim().is_empty() {
        return Err(TagsumError::invalid_config("program_id must not be empty"));
    }
    if cfg.network.timeout_ms == 0 {
        return Err(TagsumError::invalid_config(
            "network timeout must be greater than zero",
        ));
    }

    if cfg.extraction.endpoint.trim().is_empty() {
        return Err(TagsumError::invalid_config("extraction endpoint must not be empty"));
    }
    if cfg.extraction.timeout_ms == 0 {
        return Err(TagsumError::invalid_config(
            "extraction timeout must be greater than zero",
        ));
    }

    Ok(())
}
