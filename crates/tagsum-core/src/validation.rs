//! Client-side validation mirroring the program's enforced limits.
//!
//! Rules are checked in a fixed order (summary, tags, category, confidence)
//! and the first failure is returned. The transaction hash is validated by a
//! separate function because it is an argument of the submission, not part of
//! the extracted metadata.
//!
//! This module performs no I/O.

use thiserror::Error;

use crate::config::LimitsConfig;
use crate::model::AiProcessingResult;

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Transaction hash must be {expected} hexadecimal characters ({reason})")]
    InvalidHash { expected: usize, reason: HashProblem },

    #[error("Summary is required")]
    EmptySummary,

    #[error("Summary too long ({len} bytes, maximum {max})")]
    SummaryTooLong { len: usize, max: usize },

    #[error("At least one tag is required")]
    NoTags,

    #[error("Too many tags ({count}, maximum {max} allowed)")]
    TooManyTags { count: usize, max: usize },

    #[error("Tags cannot be empty (tag #{index})")]
    EmptyTag { index: usize },

    #[error("Category is required")]
    InvalidCategory,

    #[error("Invalid confidence score {score} (0-{max} only)")]
    InvalidConfidence { score: i64, max: i64 },
}

impl ValidationError {
    /// Stable machine-readable code, used in CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidHash { .. } => "InvalidHash",
            Self::EmptySummary => "EmptySummary",
            Self::SummaryTooLong { .. } => "SummaryTooLong",
            Self::NoTags => "NoTags",
            Self::TooManyTags { .. } => "TooManyTags",
            Self::EmptyTag { .. } => "EmptyTag",
            Self::InvalidCategory => "InvalidCategory",
            Self::InvalidConfidence { .. } => "InvalidConfidence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashProblem {
    WrongLength(usize),
    NotHex,
}

impl std::fmt::Display for HashProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength(n) => write!(f, "got {n} characters"),
            Self::NotHex => f.write_str("non-hex character"),
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

pub fn validate_transaction_hash(hash: &str, limits: &LimitsConfig) -> ValidationResult {
    let len = hash.chars().count();
    if len != limits.hash_len {
        return Err(ValidationError::InvalidHash {
            expected: limits.hash_len,
            reason: HashProblem::WrongLength(len),
        });
    }
    if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidHash {
            expected: limits.hash_len,
            reason: HashProblem::NotHex,
        });
    }
    Ok(())
}

pub fn validate_summary(summary: &str, limits: &LimitsConfig) -> ValidationResult {
    if summary.trim().is_empty() {
        return Err(ValidationError::EmptySummary);
    }
    let len = summary.len();
    if len > limits.max_summary_bytes {
        return Err(ValidationError::SummaryTooLong {
            len,
            max: limits.max_summary_bytes,
        });
    }
    Ok(())
}

pub fn validate_tags(tags: &[String], limits: &LimitsConfig) -> ValidationResult {
    if tags.is_empty() {
        return Err(ValidationError::NoTags);
    }
    if tags.len() > limits.max_tags {
        return Err(ValidationError::TooManyTags {
            count: tags.len(),
            max: limits.max_tags,
        });
    }
    if let Some(index) = tags.iter().position(|t| t.trim().is_empty()) {
        return Err(ValidationError::EmptyTag { index });
    }
    Ok(())
}

pub fn validate_category(category: &str) -> ValidationResult {
    if category.trim().is_empty() {
        return Err(ValidationError::InvalidCategory);
    }
    Ok(())
}

pub fn validate_confidence(score: i64, limits: &LimitsConfig) -> ValidationResult {
    if !(0..=limits.max_confidence).contains(&score) {
        return Err(ValidationError::InvalidConfidence {
            score,
            max: limits.max_confidence,
        });
    }
    Ok(())
}

/// Validate an extraction result, stopping at the first violated rule.
pub fn validate_result(result: &AiProcessingResult, limits: &LimitsConfig) -> ValidationResult {
    validate_summary(&result.summary, limits)?;
    validate_tags(&result.tags, limits)?;
    validate_category(&result.category)?;
    validate_confidence(result.confidence_score, limits)?;
    Ok(())
}

/// Every violated rule, in rule order. Diagnostic only; submission paths use
/// [`validate_result`].
pub fn validate_all(result: &AiProcessingResult, limits: &LimitsConfig) -> Vec<ValidationError> {
    [
        validate_summary(&result.summary, limits),
        validate_tags(&result.tags, limits),
        validate_category(&result.category),
        validate_confidence(result.confidence_score, limits),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}
