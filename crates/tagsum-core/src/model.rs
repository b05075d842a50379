//! tagsum data models.
//!
//! Models here are "dumb" data. Policy (validation, limits) lives in
//! `crate::validation`; on-chain account records live in the chain client crate
//! because they carry Solana public keys.

use serde::{Deserialize, Serialize};

/// Metadata extracted from a free-text transaction description.
///
/// `confidence_score` is signed and wide on purpose: an upstream model may
/// return anything, and out-of-range values must be representable so that
/// validation can reject them instead of silently wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiProcessingResult {
    pub summary: String,
    pub tags: Vec<String>,
    pub category: String,
    pub confidence_score: i64,
}

impl AiProcessingResult {
    pub fn new(
        summary: impl Into<String>,
        tags: Vec<String>,
        category: impl Into<String>,
        confidence_score: i64,
    ) -> Self {
        Self {
            summary: summary.into(),
            tags,
            category: category.into(),
            confidence_score,
        }
    }

    /// Confidence as the program's `u8`, if it fits.
    pub fn confidence_u8(&self) -> Option<u8> {
        u8::try_from(self.confidence_score).ok()
    }
}
