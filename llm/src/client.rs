//! # Chat Completion Client
//!
//! Defines the [`ChatClient`] capability trait and the [`OpenAiClient`]
//! implementation for OpenAI-compatible `chat/completions` endpoints.
//!
//! The request always asks for a JSON object reply (`response_format`), since
//! every consumer in this workspace parses the content as strict JSON.

use crate::error::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use util::config::AppConfig;

/// The single LLM capability consumed by the grading workspace.
///
/// Implementations issue one completion request and return the raw reply text.
/// The system message and user prompt are supplied per call; model choice and
/// sampling temperature belong to the implementation.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Issue one completion request and return the trimmed reply content.
    async fn complete(&self, system_message: &str, user_prompt: &str) -> Result<String, LlmError>;
}

/// Request body for an OpenAI-compatible `chat/completions` endpoint.
#[derive(Serialize)]
struct ChatRequest {
    /// Model name to complete with.
    model: String,
    /// Ordered system and user messages.
    messages: Vec<ChatMessage>,
    /// Sampling temperature; low values keep extraction and grading consistent.
    temperature: f32,
    /// Forces the endpoint to reply with a JSON object.
    response_format: ResponseFormat,
}

/// A single chat message in the request.
#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// The reply format constraint sent with every request.
#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format: &'static str,
}

/// Response from an OpenAI-compatible endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    /// Candidate completions; only the first is consumed.
    choices: Vec<Choice>,
}

/// A single candidate completion.
#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

/// The message carried by a candidate completion.
#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// `reqwest`-based [`ChatClient`] for OpenAI-compatible endpoints.
///
/// Reads the API key and base URL from [`AppConfig`] at call time, so test
/// overrides via the config setters take effect without rebuilding the client.
pub struct OpenAiClient {
    http: reqwest::Client,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    /// Create a client for the given model with the default low temperature.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            model: model.into(),
            temperature: 0.1,
        }
    }

    /// Create a client using the configured identity-extraction model.
    pub fn for_identity_extraction() -> Self {
        Self::new(AppConfig::global().identity_model.clone())
    }

    /// Create a client using the configured grading model, at grading temperature.
    pub fn for_grading() -> Self {
        Self::new(AppConfig::global().grading_model.clone()).with_temperature(0.3)
    }

    /// Set a custom sampling temperature for this client.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, system_message: &str, user_prompt: &str) -> Result<String, LlmError> {
        let (api_key, base_url) = {
            let cfg = AppConfig::global();
            (cfg.openai_api_key.clone(), cfg.openai_base_url.clone())
        };

        if api_key.is_empty() {
            return Err(LlmError::Request(
                "OPENAI_API_KEY environment variable not set".to_string(),
            ));
        }

        let request_body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_message.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat {
                format: "json_object",
            },
        };

        debug!(model = %self.model, prompt_length = user_prompt.len(), "sending completion request");

        let response = self
            .http
            .post(format!("{}/chat/completions", base_url.trim_end_matches('/')))
            .bearer_auth(&api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::Request(format!(
                "endpoint returned {}: {}",
                status, response_text
            )));
        }

        let response = serde_json::from_str::<ChatResponse>(&response_text).map_err(|e| {
            LlmError::MalformedReply(format!(
                "error decoding response body: {}. Full response: {}",
                e, response_text
            ))
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| LlmError::EmptyReply(self.model.clone()))?;

        debug!(model = %self.model, "completion request succeeded");

        Ok(content.trim().to_string())
    }
}
