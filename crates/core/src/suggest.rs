//! Hunt idea generation through an external text generation service.
//!
//! The service is best effort: it may be unconfigured, fail, or return nothing, and
//! callers that only want ideas should go through [`suggest_or_empty`].

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::catalog::HuntDraft;
use crate::models::{HuntError, Result};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_KEY_VAR: &str = "API_KEY";

pub trait HuntSuggester: Send + Sync {
    fn suggest_hunts<'a>(
        &'a self,
        topic: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<HuntDraft>>> + Send + 'a>>;
}

/// Ask `suggester` for ideas, treating any failure as "no ideas"
pub async fn suggest_or_empty(suggester: &dyn HuntSuggester, topic: &str) -> Vec<HuntDraft> {
    if topic.trim().is_empty() {
        return Vec::new();
    }

    match suggester.suggest_hunts(topic).await {
        Ok(drafts) => drafts,
        Err(e) => {
            tracing::warn!(%topic, error = %e, "hunt suggestion failed");
            Vec::new()
        }
    }
}

/// Decode the service's JSON array of drafts. Items that don't fit are skipped.
pub fn decode_drafts(text: &str) -> Result<Vec<HuntDraft>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| HuntError::Suggestion(format!("invalid JSON from service: {e}")))?;

    let Value::Array(items) = value else {
        return Err(HuntError::Suggestion("expected a JSON array of hunts".into()));
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<HuntDraft>(item) {
            Ok(draft) => Some(draft),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed hunt suggestion");
                None
            }
        })
        .collect())
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggesterConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    /// How many ideas to ask for
    pub suggestion_count: u32,
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            suggestion_count: 3,
        }
    }
}

impl SuggesterConfig {
    /// Defaults, with the API key taken from `API_KEY` when set
    pub fn from_env() -> Self {
        Self::with_api_key(std::env::var(API_KEY_VAR).ok())
    }

    /// Defaults with `api_key`. An empty key counts as none.
    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.is_empty()),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.text.as_deref())
    }
}

/// Suggester backed by the Gemini `generateContent` API with structured JSON output
pub struct GeminiSuggester {
    client: reqwest::Client,
    config: SuggesterConfig,
}

impl GeminiSuggester {
    pub fn new(config: SuggesterConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn prompt(&self, topic: &str) -> String {
        format!(
            "Generate {count} unique and engaging university campus scavenger hunt ideas \
             revolving around the theme: \"{topic}\".\n\
             Return the data in a strict JSON array format.\n\
             Each item should have:\n\
             - title (string)\n\
             - description (string, max 20 words)\n\
             - difficulty (Enum: \"Easy\", \"Medium\", \"Hard\")\n\
             - duration (number, in minutes)",
            count = self.config.suggestion_count,
        )
    }

    fn request(&self, topic: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(self.prompt(topic)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: json!({
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": { "type": "STRING" },
                            "description": { "type": "STRING" },
                            "difficulty": { "type": "STRING", "enum": ["Easy", "Medium", "Hard"] },
                            "duration": { "type": "INTEGER" }
                        },
                        "required": ["title", "description", "difficulty", "duration"]
                    }
                }),
            },
        }
    }

    async fn generate(&self, topic: &str) -> Result<Vec<HuntDraft>> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::warn!("no API key configured for hunt suggestions");
            return Ok(Vec::new());
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );

        let response: GenerateContentResponse = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&self.request(topic))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| HuntError::Suggestion(e.to_string()))?
            .json()
            .await
            .map_err(|e| HuntError::Suggestion(e.to_string()))?;

        match response.text() {
            Some(text) => decode_drafts(text),
            None => Ok(Vec::new()),
        }
    }
}

impl HuntSuggester for GeminiSuggester {
    fn suggest_hunts<'a>(
        &'a self,
        topic: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<HuntDraft>>> + Send + 'a>> {
        Box::pin(self.generate(topic))
    }
}
