//! Offline keyword heuristic.
//!
//! Used when no API key is configured, and in tests. The first matching rule
//! decides the category; a description that matches nothing is "other".

use async_trait::async_trait;
use tagsum_core::model::AiProcessingResult;

use crate::error::ExtractError;
use crate::provider::MetadataProvider;

struct Rule {
    keywords: &'static [&'static str],
    category: &'static str,
    tags: &'static [&'static str],
    confidence: i64,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["food", "meal", "cafe", "coffee", "lunch", "dinner"],
        category: "dining",
        tags: &["food", "meal"],
        confidence: 85,
    },
    Rule {
        keywords: &["book", "course", "class", "tuition", "lab"],
        category: "academic",
        tags: &["academic", "education"],
        confidence: 90,
    },
    Rule {
        keywords: &["bus", "transport", "parking", "shuttle"],
        category: "transportation",
        tags: &["transportation"],
        confidence: 80,
    },
    Rule {
        keywords: &["movie", "game", "entertainment", "concert"],
        category: "entertainment",
        tags: &["entertainment"],
        confidence: 70,
    },
    Rule {
        keywords: &["store", "shop", "purchase"],
        category: "shopping",
        tags: &["shopping"],
        confidence: 75,
    },
];

const BASE_TAG: &str = "campus";
const UNMATCHED_CONFIDENCE: i64 = 75;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicProvider;

impl HeuristicProvider {
    pub fn analyze(&self, description: &str) -> AiProcessingResult {
        let lower = description.to_lowercase();
        let rule = RULES
            .iter()
            .find(|r| r.keywords.iter().any(|k| lower.contains(k)));

        let mut tags = vec![BASE_TAG.to_string()];
        let (category, confidence) = match rule {
            Some(r) => {
                tags.extend(r.tags.iter().map(|t| t.to_string()));
                (r.category, r.confidence)
            }
            None => ("other", UNMATCHED_CONFIDENCE),
        };
        tags.truncate(crate::groq::MAX_TAGS);

        let summary = format!(
            "Campus transaction processed: {category} category with {} tags.",
            tags.len()
        );
        AiProcessingResult::new(summary, tags, category, confidence)
    }
}

#[async_trait]
impl MetadataProvider for HeuristicProvider {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn extract(&self, description: &str) -> Result<AiProcessingResult, ExtractError> {
        Ok(self.analyze(description))
    }
}
