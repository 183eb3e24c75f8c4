//! OpenAIApiAgent - Direct REST API implementation for OpenAI GPT.
//!
//! Calls the Chat Completions API and hands the raw reply text back to the
//! scene provider. Configuration priority: ~/.config/act/secret.json >
//! environment variables.

use act_core::config::{DEFAULT_OPENAI_MODEL, GenerationConfig};
use act_core::generation::{CompletionRequest, GenerativeService};
use act_core::GenerationError;
use act_infrastructure::storage::SecretStorage;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Generative service backed by the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAIApiAgent {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl std::fmt::Debug for OpenAIApiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIApiAgent")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenAIApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: BASE_URL.to_string(),
        }
    }

    /// Loads the API key from ~/.config/act/secret.json or the environment.
    ///
    /// Priority:
    /// 1. ~/.config/act/secret.json
    /// 2. Environment variables (OPENAI_API_KEY, OPENAI_MODEL_NAME)
    ///
    /// The model falls back to `config.model`; the transport timeout comes
    /// from `config.timeout_secs`.
    pub fn try_from_env(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let (api_key, model) = match Self::load_secret() {
            Some(found) => found,
            None => {
                let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
                    GenerationError::ServiceUnavailable(
                        "OPENAI_API_KEY not found in ~/.config/act/secret.json or environment variables"
                            .into(),
                    )
                })?;
                (api_key, env::var("OPENAI_MODEL_NAME").ok())
            }
        };

        if api_key.trim().is_empty() {
            return Err(GenerationError::ServiceUnavailable(
                "OpenAI API key is empty".into(),
            ));
        }

        let model = model.unwrap_or_else(|| {
            if config.model.is_empty() {
                DEFAULT_OPENAI_MODEL.to_string()
            } else {
                config.model.clone()
            }
        });

        Self::new(api_key, model).with_timeout(Duration::from_secs(config.timeout_secs))
    }

    fn load_secret() -> Option<(String, Option<String>)> {
        let storage = SecretStorage::new().ok()?;
        match storage.openai_credentials() {
            Ok(openai) => openai.map(|openai| (openai.api_key, openai.model_name)),
            Err(e) => {
                tracing::warn!("[OpenAIApiAgent] Ignoring secret file: {}", e);
                None
            }
        }
    }

    /// Rebuilds the HTTP client with a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, GenerationError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| GenerationError::Unknown(format!("Failed to build HTTP client: {err}")))?;
        Ok(self)
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at a compatible endpoint (proxies, gateways).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: request.instruction.clone(),
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| GenerationError::NetworkFailure {
                status_code: None,
                message: format!("OpenAI API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            GenerationError::malformed(format!("Failed to parse OpenAI response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl GenerativeService for OpenAIApiAgent {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        let body = self.build_body(request);
        tracing::debug!(
            "[OpenAIApiAgent] Requesting completion: model={}, max_tokens={}, temperature={}",
            body.model,
            body.max_tokens,
            body.temperature
        );
        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, GenerationError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| {
            GenerationError::malformed("OpenAI API returned no content in the response")
        })
}

fn map_http_error(
    status: StatusCode,
    body: String,
    retry_after: Option<Duration>,
) -> GenerationError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    GenerationError::NetworkFailure {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date values are not handled.
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
