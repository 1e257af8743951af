use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use async_trait::async_trait;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use ollama_rs::Ollama;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::TARGET_LLM_REQUEST;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request timed out after {secs} seconds")]
    Timeout { secs: u64 },

    #[error("request failed: {0}")]
    Request(String),

    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Anything that turns a prompt into free text. The pipeline only ever talks
/// to the model through this trait.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Clone, Debug)]
pub enum LlmClient {
    Ollama(Ollama),
    OpenAI(OpenAIClient<OpenAIConfig>),
}

/// A configured model endpoint with its call budget.
#[derive(Clone, Debug)]
pub struct LlmGenerator {
    client: LlmClient,
    model: String,
    temperature: f32,
    timeout: Duration,
    name: String,
}

impl LlmGenerator {
    pub fn new(client: LlmClient, model: &str, temperature: f32, timeout: Duration) -> Self {
        let name = match &client {
            LlmClient::Ollama(_) => format!("ollama/{}", model),
            LlmClient::OpenAI(_) => format!("openai/{}", model),
        };

        Self {
            client,
            model: model.to_string(),
            temperature,
            timeout,
            name,
        }
    }

    /// Builds a generator from the environment.
    ///
    /// `NEWSDESK_LLM` picks the backend (`ollama`, `openai` or `none`). A
    /// missing backend or credential yields `None`, which callers treat as a
    /// normal condition and answer with the local heuristics.
    pub fn from_env() -> Option<Self> {
        let temperature: f32 = env::var("LLM_TEMPERATURE")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.0);
        let timeout = env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        match env::var("NEWSDESK_LLM")
            .unwrap_or_else(|_| "none".to_string())
            .to_lowercase()
            .as_str()
        {
            "openai" => {
                let api_key = match env::var("OPENAI_API_KEY") {
                    Ok(key) if !key.trim().is_empty() => key,
                    _ => {
                        warn!(target: TARGET_LLM_REQUEST, "NEWSDESK_LLM=openai but OPENAI_API_KEY is not set, using local heuristics");
                        return None;
                    }
                };
                let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
                let config = OpenAIConfig::new().with_api_key(api_key);
                info!(target: TARGET_LLM_REQUEST, "Using OpenAI model {}", model);
                Some(Self::new(
                    LlmClient::OpenAI(OpenAIClient::with_config(config)),
                    &model,
                    temperature,
                    timeout,
                ))
            }
            "ollama" => {
                let host = env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost".to_string());
                let port: u16 = env::var("OLLAMA_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(11434);
                let model = env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3".to_string());
                info!(target: TARGET_LLM_REQUEST, "Connecting to Ollama at {}:{} with model {}", host, port, model);
                Some(Self::new(
                    LlmClient::Ollama(Ollama::new(host, port)),
                    &model,
                    temperature,
                    timeout,
                ))
            }
            _ => {
                info!(target: TARGET_LLM_REQUEST, "No language model configured, using local heuristics");
                None
            }
        }
    }

    async fn send(&self, prompt: &str) -> Result<String, LlmError> {
        match &self.client {
            LlmClient::Ollama(ollama) => {
                let mut request = GenerationRequest::new(self.model.clone(), prompt.to_string());
                request.options = Some(GenerationOptions::default().temperature(self.temperature));
                ollama
                    .generate(request)
                    .await
                    .map(|response| response.response)
                    .map_err(|e| LlmError::Request(e.to_string()))
            }
            LlmClient::OpenAI(client) => {
                let messages: Vec<ChatCompletionRequestMessage> =
                    vec![ChatCompletionRequestUserMessageArgs::default()
                        .content(prompt)
                        .build()
                        .map_err(|e| LlmError::Request(e.to_string()))?
                        .into()];
                let request = CreateChatCompletionRequestArgs::default()
                    .model(&self.model)
                    .temperature(self.temperature)
                    .messages(messages)
                    .build()
                    .map_err(|e| LlmError::Request(e.to_string()))?;

                let response = client
                    .chat()
                    .create(request)
                    .await
                    .map_err(|e| LlmError::Request(e.to_string()))?;

                response
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.message.content)
                    .ok_or(LlmError::EmptyResponse)
            }
        }
    }
}

#[async_trait]
impl TextGenerator for LlmGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(target: TARGET_LLM_REQUEST, "[{}]: sending prompt of {} chars", self.name, prompt.len());

        let response = match timeout(self.timeout, self.send(prompt)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(target: TARGET_LLM_REQUEST, "[{}]: request timed out", self.name);
                return Err(LlmError::Timeout {
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if response.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!(target: TARGET_LLM_REQUEST, "[{}]: response received: {}", self.name, response);
        Ok(response)
    }
}
