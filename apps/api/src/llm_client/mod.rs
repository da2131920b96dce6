/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// All LLM interactions MUST go through the `ChatModel` trait defined here.
///
/// The API key is NOT part of the client. It is passed on every call so that
/// each simulation run uses the credential it was submitted with.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod prompts;

/// Generation settings for the multi-agent assessment.
const ASSESSMENT_TEMPERATURE: f32 = 0.7;
const ASSESSMENT_MAX_TOKENS: u32 = 2500;
/// Generation settings for the cheap connectivity probe.
const CONNECTION_TEST_TEMPERATURE: f32 = 0.7;
const CONNECTION_TEST_MAX_TOKENS: u32 = 50;
const HTTP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Which model settings a call should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelProfile {
    Assessment,
    ConnectionTest,
}

/// A single system + user turn sent to the model.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub profile: ModelProfile,
    pub system: String,
    pub prompt: String,
}

/// The chat model seam. `LlmClient` talks to a real provider; tests plug in a
/// scripted model.
///
/// Carried in `AppState` as `Arc<dyn ChatModel>`.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, api_key: &str, request: CompletionRequest)
        -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Extracts the non-blank text of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Pulls the provider's error message out of a failed response body,
/// falling back to the raw body.
fn provider_error_message(body: String) -> String {
    serde_json::from_str::<ProviderError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// OpenAI-compatible chat-completions client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    assessment_model: String,
    connection_test_model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()?,
            base_url: config.llm_base_url.clone(),
            assessment_model: config.llm_model.clone(),
            connection_test_model: config.llm_test_model.clone(),
        })
    }

    /// The model name a given profile resolves to.
    pub fn model_for(&self, profile: ModelProfile) -> &str {
        match profile {
            ModelProfile::Assessment => &self.assessment_model,
            ModelProfile::ConnectionTest => &self.connection_test_model,
        }
    }

    /// Makes a single call to the chat-completions endpoint. No retries.
    pub async fn call(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let (temperature, max_tokens) = match request.profile {
            ModelProfile::Assessment => (ASSESSMENT_TEMPERATURE, ASSESSMENT_MAX_TOKENS),
            ModelProfile::ConnectionTest => {
                (CONNECTION_TEST_TEMPERATURE, CONNECTION_TEST_MAX_TOKENS)
            }
        };

        let body = ChatCompletionRequest {
            model: self.model_for(request.profile),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: provider_error_message(body),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                body.model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(
        &self,
        api_key: &str,
        request: CompletionRequest,
    ) -> Result<String, LlmError> {
        let response = self.call(api_key, &request).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}
