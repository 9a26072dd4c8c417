//! Hosted text-generation client.
//!
//! Talks to the Gemini `generateContent` endpoint with a blocking HTTP
//! client. Failures surface as [`InsightError`] for the caller to display;
//! they never affect the analysis pipeline.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::prompt::format_prompt;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_MAX_TOKENS: u32 = 1024;
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("missing API key: {0}")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for the narrative-insight service.
#[derive(Clone)]
pub struct InsightClient {
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl InsightClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable,
    /// loading `.env` first if present.
    pub fn from_env() -> Result<Self, InsightError> {
        let _ = dotenvy::dotenv();
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| InsightError::MissingApiKey("GEMINI_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Override the model name.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Override the maximum number of response tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Generate narrative commentary for one analysis result.
    ///
    /// Formats the fixed prompt template with the question and the rendered
    /// data, then calls the model with bounded retries.
    pub fn generate_insight(&self, question: &str, data: &str) -> Result<String, InsightError> {
        let prompt = format_prompt(question, data);
        let mut last_error = None;
        for attempt in 1..=MAX_RETRIES {
            match self.try_generate(&prompt) {
                Ok(text) => return Ok(text),
                Err(err) => {
                    warn!(attempt, max = MAX_RETRIES, error = %err, "insight request failed");
                    last_error = Some(err);
                    if attempt < MAX_RETRIES {
                        std::thread::sleep(RETRY_DELAY);
                    }
                }
            }
        }
        Err(last_error
            .unwrap_or_else(|| InsightError::Request("no attempts were made".to_string())))
    }

    fn try_generate(&self, prompt: &str) -> Result<String, InsightError> {
        let url = format!(
            "{API_BASE}/{model}:generateContent?key={key}",
            model = self.model,
            key = self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "maxOutputTokens": self.max_tokens },
        });

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|err| InsightError::Request(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|err| InsightError::Request(err.to_string()))?;
        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|parsed| parsed.error.message)
                .unwrap_or(text);
            return Err(InsightError::Api(message));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|err| InsightError::InvalidResponse(err.to_string()))?;
        let combined: String = parsed
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect()
            })
            .unwrap_or_default();
        if combined.is_empty() {
            return Err(InsightError::InvalidResponse(
                "response contained no text".to_string(),
            ));
        }
        Ok(combined)
    }
}
