//! Fallback-on-failure extraction.

use serde::Serialize;
use tagsum_core::config::ExtractionConfig;
use tagsum_core::model::AiProcessingResult;
use tracing::{debug, warn};

use crate::groq::GroqProvider;
use crate::heuristic::HeuristicProvider;
use crate::provider::MetadataProvider;

/// The fixed result used whenever a provider fails.
pub fn fallback_result() -> AiProcessingResult {
    AiProcessingResult::new(
        "Campus transaction",
        vec!["campus".to_string(), "transaction".to_string()],
        "other",
        50,
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ExtractionSource {
    Provider { name: String },
    Fallback { provider: String, reason: String },
}

/// A result plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub result: AiProcessingResult,
    pub source: ExtractionSource,
}

impl Extraction {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ExtractionSource::Fallback { .. })
    }
}

pub struct MetadataExtractor {
    provider: Box<dyn MetadataProvider>,
}

impl MetadataExtractor {
    pub fn new(provider: Box<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Groq when an API key is configured, the offline heuristic otherwise.
    pub fn from_config(cfg: &ExtractionConfig) -> Self {
        match GroqProvider::from_config(cfg) {
            Ok(groq) => Self::new(Box::new(groq)),
            Err(e) => {
                debug!(reason = %e, "groq unavailable, using heuristic provider");
                Self::new(Box::new(HeuristicProvider))
            }
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn extract_detailed(&self, description: &str) -> Extraction {
        let name = self.provider.name().to_string();
        match self.provider.extract(description).await {
            Ok(result) => Extraction {
                result,
                source: ExtractionSource::Provider { name },
            },
            Err(e) => {
                warn!(provider = %name, error = %e, "metadata extraction failed, using fallback");
                Extraction {
                    result: fallback_result(),
                    source: ExtractionSource::Fallback {
                        provider: name,
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Never fails; see [`fallback_result`].
    pub async fn extract(&self, description: &str) -> AiProcessingResult {
        self.extract_detailed(description).await.result
    }

    /// One at a time, in input order. Each item falls back independently.
    pub async fn extract_batch<S: AsRef<str>>(&self, descriptions: &[S]) -> Vec<AiProcessingResult> {
        let mut out = Vec::with_capacity(descriptions.len());
        for d in descriptions {
            out.push(self.extract(d.as_ref()).await);
        }
        out
    }
}
