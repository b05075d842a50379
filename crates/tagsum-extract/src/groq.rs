//! Groq chat-completions provider.
//!
//! One POST per description. The model is asked for a JSON object with
//! `summary`, `tags`, `category` and `confidenceScore`; whatever comes back is
//! sanitized into bounds before it leaves this module.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tagsum_core::config::ExtractionConfig;
use tagsum_core::model::AiProcessingResult;
use tagsum_core::text::{normalize_tags, normalize_text, truncate_chars};
use tracing::debug;

use crate::error::ExtractError;
use crate::provider::MetadataProvider;

pub const SUMMARY_MAX_CHARS: usize = 100;
pub const MAX_TAGS: usize = 5;
pub const DEFAULT_SUMMARY: &str = "Transaction summary";
pub const DEFAULT_TAG: &str = "transaction";
pub const DEFAULT_CATEGORY: &str = "other";
pub const DEFAULT_CONFIDENCE: i64 = 80;

pub struct GroqProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GroqProvider {
    pub fn from_config(cfg: &ExtractionConfig) -> Result<Self, ExtractError> {
        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ExtractError::MissingApiKey)?;
        let timeout = Duration::from_millis(cfg.timeout_ms);

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key,
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
            timeout,
        })
    }

    fn request_body(&self, description: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(description),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

pub fn build_prompt(description: &str) -> String {
    format!(
        r#"Analyze this campus transaction and extract metadata:

Transaction: "{description}"

Please provide a JSON response with the following structure:
{{
  "summary": "A concise summary of the transaction (max 100 characters)",
  "tags": ["tag1", "tag2", "tag3", "tag4", "tag5"] (max 5 tags),
  "category": "One of: dining, academic, transportation, entertainment, shopping, services, other",
  "confidenceScore": 85 (confidence percentage 0-100)
}}

Focus on campus-related transactions. Tags should be relevant keywords like "food", "textbook", "bus", "coffee", "campus", etc."#
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<MessageResponse>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

/// Parse the model's message content into a JSON object.
///
/// Models sometimes wrap the object in prose or a code fence, so when the
/// whole content is not JSON the outermost `{ ... }` span is tried.
pub fn parse_content(content: &str) -> Result<Value, ExtractError> {
    let trimmed = content.trim();
    if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(v);
    }
    let span = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => return Err(ExtractError::Malformed("no JSON object in content".into())),
    };
    match serde_json::from_str::<Value>(span) {
        Ok(v @ Value::Object(_)) => Ok(v),
        Ok(_) => Err(ExtractError::Malformed("content is not a JSON object".into())),
        Err(e) => Err(ExtractError::Malformed(e.to_string())),
    }
}

/// Force a parsed model answer into bounds.
///
/// Missing or blank fields take their defaults. A confidence of exactly 0 is
/// treated as missing.
pub fn sanitize(value: &Value) -> AiProcessingResult {
    let summary = value
        .get("summary")
        .and_then(Value::as_str)
        .map(normalize_text)
        .filter(|s| !s.is_empty())
        .map(|s| truncate_chars(&s, SUMMARY_MAX_CHARS))
        .unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

    let tags = match value.get("tags").and_then(Value::as_array) {
        Some(items) => normalize_tags(items.iter().filter_map(Value::as_str), MAX_TAGS),
        None => vec![DEFAULT_TAG.to_string()],
    };

    let category = value
        .get("category")
        .and_then(Value::as_str)
        .map(normalize_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let confidence = value
        .get("confidenceScore")
        .and_then(Value::as_f64)
        .map(|f| f.round() as i64)
        .filter(|n| *n != 0)
        .unwrap_or(DEFAULT_CONFIDENCE)
        .clamp(0, 100);

    AiProcessingResult::new(summary, tags, category, confidence)
}

#[async_trait]
impl MetadataProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn extract(&self, description: &str) -> Result<AiProcessingResult, ExtractError> {
        debug!(model = %self.model, endpoint = %self.endpoint, "requesting metadata");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(description))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractError::Timeout(self.timeout)
                } else {
                    ExtractError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Malformed(e.to_string()))?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ExtractError::EmptyContent)?;

        let value = parse_content(&content)?;
        Ok(sanitize(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn sanitize_keeps_in_bounds_answer() {
        let r = sanitize(&json!({
            "summary": "Coffee and bagel at the student union",
            "tags": ["coffee", "food", "campus"],
            "category": "dining",
            "confidenceScore": 92
        }));
        assert_eq!(r.summary, "Coffee and bagel at the student union");
        assert_eq!(r.tags, vec!["coffee", "food", "campus"]);
        assert_eq!(r.category, "dining");
        assert_eq!(r.confidence_score, 92);
    }

    #[test]
    fn sanitize_applies_defaults() {
        let r = sanitize(&json!({}));
        assert_eq!(r.summary, DEFAULT_SUMMARY);
        assert_eq!(r.tags, vec![DEFAULT_TAG]);
        assert_eq!(r.category, DEFAULT_CATEGORY);
        assert_eq!(r.confidence_score, DEFAULT_CONFIDENCE);

        let r = sanitize(&json!({ "summary": "  ", "category": "", "confidenceScore": 0 }));
        assert_eq!(r.summary, DEFAULT_SUMMARY);
        assert_eq!(r.category, DEFAULT_CATEGORY);
        assert_eq!(r.confidence_score, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn sanitize_enforces_bounds() {
        let long = "x".repeat(250);
        let r = sanitize(&json!({
            "summary": long,
            "tags": ["a", "b", "c", "d", "e", "f", "g"],
            "confidenceScore": 140
        }));
        assert_eq!(r.summary.chars().count(), SUMMARY_MAX_CHARS);
        assert_eq!(r.tags.len(), MAX_TAGS);
        assert_eq!(r.confidence_score, 100);

        assert_eq!(sanitize(&json!({ "confidenceScore": -5 })).confidence_score, 0);
        assert_eq!(sanitize(&json!({ "confidenceScore": 66.6 })).confidence_score, 67);
    }

    #[test]
    fn sanitize_keeps_empty_tag_array() {
        // An explicit empty list is not replaced; validation reports it.
        assert!(sanitize(&json!({ "tags": [] })).tags.is_empty());
        assert_eq!(sanitize(&json!({ "tags": "food" })).tags, vec![DEFAULT_TAG]);
    }

    #[test]
    fn parse_content_accepts_fenced_json() {
        let v = parse_content("```json\n{\"summary\": \"x\"}\n```").unwrap();
        assert_eq!(v["summary"], "x");
    }

    #[test]
    fn parse_content_rejects_non_objects() {
        assert_matches!(parse_content("no json here"), Err(ExtractError::Malformed(_)));
        assert_matches!(parse_content("[1, 2]"), Err(ExtractError::Malformed(_)));
        assert_matches!(parse_content("{ broken"), Err(ExtractError::Malformed(_)));
    }

    #[test]
    fn prompt_embeds_description() {
        let p = build_prompt("Textbook from campus store");
        assert!(p.contains("Transaction: \"Textbook from campus store\""));
        assert!(p.contains("confidenceScore"));
    }

    #[test]
    fn missing_key_is_rejected() {
        let cfg = ExtractionConfig::default();
        assert_matches!(GroqProvider::from_config(&cfg), Err(ExtractError::MissingApiKey));

        let blank = ExtractionConfig {
            api_key: Some("  ".into()),
            ..ExtractionConfig::default()
        };
        assert_matches!(GroqProvider::from_config(&blank), Err(ExtractError::MissingApiKey));
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = ExtractionConfig {
            api_key: Some("gsk_secret".into()),
            ..ExtractionConfig::default()
        };
        let s = format!("{:?}", GroqProvider::from_config(&cfg).unwrap());
        assert!(!s.contains("gsk_secret"));
        assert!(s.contains("<redacted>"));
    }

    #[test]
    fn request_body_matches_chat_completions_shape() {
        let cfg = ExtractionConfig {
            api_key: Some("k".into()),
            ..ExtractionConfig::default()
        };
        let p = GroqProvider::from_config(&cfg).unwrap();
        let body = serde_json::to_value(p.request_body("Bus pass")).unwrap();
        assert_eq!(body["model"], "llama-3.3-70b-versatile");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "user");
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }
}
