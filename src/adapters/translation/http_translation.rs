//! HTTP Translation Service - translates cards through an OpenAI-compatible
//! chat completions endpoint.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpTranslationConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let service = HttpTranslationService::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::MAX_RETRIES_LIMIT;
use crate::ports::{TranslationError, TranslationRequest, TranslationService};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You translate allergy information for travellers. \
Reply with the translation only.";

/// Configuration for the HTTP translation service.
#[derive(Debug, Clone)]
pub struct HttpTranslationConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    pub model: String,
    /// Base URL without the trailing `/chat/completions`.
    pub base_url: String,
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl HttpTranslationConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Capped at [`MAX_RETRIES_LIMIT`].
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.min(MAX_RETRIES_LIMIT);
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

pub struct HttpTranslationService {
    config: HttpTranslationConfig,
    client: Client,
}

impl HttpTranslationService {
    /// # Errors
    ///
    /// - `Network` if the HTTP client cannot be built
    pub fn new(config: HttpTranslationConfig) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                TranslationError::network(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_chat_request(&self, request: &TranslationRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.prompt(),
                },
            ],
            temperature: Some(0.2),
        }
    }

    async fn send_request(&self, body: &ChatRequest) -> Result<Response, TranslationError> {
        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::Timeout
                } else if e.is_connect() {
                    TranslationError::network(format!("Connection failed: {}", e))
                } else {
                    TranslationError::network(e.to_string())
                }
            })
    }

    async fn parse_response(&self, response: Response) -> Result<String, TranslationError> {
        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &error_body));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::parse(format!("Failed to parse response: {}", e)))?;

        extract_translation(chat)
    }

    async fn attempt(&self, body: &ChatRequest) -> Result<String, TranslationError> {
        let response = self.send_request(body).await?;
        self.parse_response(response).await
    }
}

/// Maps a non-success status to a translation error.
/// Exponential backoff: 1s, 2s, 4s, ... never past the retry limit's step.
fn backoff_delay(retry_count: u32) -> Duration {
    Duration::from_secs(1 << retry_count.min(MAX_RETRIES_LIMIT))
}

fn status_error(status: u16, error_body: &str) -> TranslationError {
    match status {
        401 | 403 => TranslationError::AuthenticationFailed,
        429 => TranslationError::rate_limited(parse_retry_after(error_body)),
        500..=599 => {
            TranslationError::unavailable(format!("Server error {}: {}", status, error_body))
        }
        _ => TranslationError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Reads "try again in Ns" from an error body, defaulting to 30 seconds.
fn parse_retry_after(error_body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|parsed| {
            let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
            let idx = message.find("try again in ")?;
            let digits: String = message[idx + "try again in ".len()..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        })
        .unwrap_or(30)
}

fn extract_translation(chat: ChatResponse) -> Result<String, TranslationError> {
    let choice = chat
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| TranslationError::parse("No choices in response"))?;

    let text = choice.message.content.trim();
    if text.is_empty() {
        return Err(TranslationError::EmptyResponse);
    }
    Ok(text.to_string())
}

#[async_trait]
impl TranslationService for HttpTranslationService {
    async fn translate(&self, request: TranslationRequest) -> Result<String, TranslationError> {
        let body = self.to_chat_request(&request);
        let mut retry_count = 0;

        loop {
            match self.attempt(&body).await {
                Ok(text) => {
                    debug!(
                        target_language = %request.target,
                        retries = retry_count,
                        "Translation received"
                    );
                    return Ok(text);
                }
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    let delay = backoff_delay(retry_count);
                    warn!(
                        error = %err,
                        attempt = retry_count + 1,
                        ?delay,
                        "Translation failed, retrying"
                    );
                    sleep(delay).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

// ----- Chat Completions API Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
