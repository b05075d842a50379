//! tagsum-extract
//!
//! Turns a free-text transaction description into an [`AiProcessingResult`].
//!
//! Providers implement [`MetadataProvider`] and may fail. [`MetadataExtractor`]
//! wraps a provider and never fails: any provider error is logged and replaced
//! by [`fallback_result`].
//!
//! [`AiProcessingResult`]: tagsum_core::model::AiProcessingResult

pub mod error;
pub mod extractor;
pub mod groq;
pub mod heuristic;
pub mod provider;

pub use error::ExtractError;
pub use extractor::{fallback_result, Extraction, ExtractionSource, MetadataExtractor};
pub use groq::GroqProvider;
pub use heuristic::HeuristicProvider;
pub use provider::MetadataProvider;
