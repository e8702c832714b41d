//! Async narration client for the Gemini generateContent API
//!
//! One endpoint, one wire format: a system instruction plus a single user
//! message, sampled under a fixed generation config. The client only
//! transports text; all deterministic chart math happens before a prompt
//! is built, and the response is parsed into a structured reading by the
//! caller.

use crate::core::error::{BaziError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-thinking-exp-1219";

/// Sampling parameters sent with every generation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        // Readings run long and benefit from loose sampling; these values
        // are tuned for narration, not extraction.
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
        }
    }
}

/// Async client for chart narration calls
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    generation_config: GenerationConfig,
}

impl LlmClient {
    /// Create a client against the default Gemini endpoint
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.into(),
            model,
            generation_config: GenerationConfig::default(),
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: GEMINI_API_KEY
    /// Optional: GEMINI_API_URL (base URL override, e.g. for a proxy)
    /// Optional: GEMINI_MODEL (defaults to the flash thinking model)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| BaziError::LlmError("GEMINI_API_KEY not set".into()))?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let mut client = Self::new(api_key, model);
        if let Ok(base_url) = std::env::var("GEMINI_API_URL") {
            client.base_url = base_url;
        }
        Ok(client)
    }

    /// Model-scoped generateContent URL
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send one narration request and return the model's text
    ///
    /// # Arguments
    /// * `system_instruction` - Standing instructions for the model
    /// * `user` - The message to narrate (typically a serialized chart)
    pub async fn complete(&self, system_instruction: &str, user: &str) -> Result<String> {
        let request = GenerateRequest {
            system_instruction: Content::text(system_instruction),
            contents: vec![Content::user(user)],
            generation_config: self.generation_config.clone(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| BaziError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BaziError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BaziError::LlmError(e.to_string()))?;

        completion
            .text()
            .ok_or_else(|| BaziError::LlmError("Empty response".into()))
    }
}

// generateContent wire format

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl Content {
    fn text(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }

    fn user(text: &str) -> Self {
        Self {
            role: Some("user".into()),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    ///
    /// Thinking models emit several parts per candidate; the reading fence
    /// can land in any of them, so all parts are joined.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        if candidate.content.parts.is_empty() {
            return None;
        }
        Some(
            candidate
                .content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect(),
        )
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}
