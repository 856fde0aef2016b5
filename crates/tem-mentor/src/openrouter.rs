//! [`OpenRouterProvider`] — a [`CompletionProvider`] for any OpenAI-compatible
//! chat-completions endpoint (OpenRouter by default).
//!
//! One POST per call, bearer-token auth, fixed client timeout. No retries.

use std::{fmt, time::Duration};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tem_core::{
  message::ChatMessage,
  provider::{CompletionProvider, CompletionRequest, ProviderError},
};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct:free";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Connection settings for the completion endpoint.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
  /// Bearer token. `None` or empty means "not configured".
  pub api_key:      Option<String>,
  /// Base URL; `/chat/completions` is appended.
  pub base_url:     String,
  pub model:        String,
  pub temperature:  Option<f32>,
  pub timeout_secs: u64,
}

impl Default for ProviderConfig {
  fn default() -> Self {
    Self {
      api_key:      None,
      base_url:     DEFAULT_BASE_URL.to_owned(),
      model:        DEFAULT_MODEL.to_owned(),
      temperature:  None,
      timeout_secs: DEFAULT_TIMEOUT_SECS,
    }
  }
}

// Redacts `api_key`.
impl fmt::Debug for ProviderConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ProviderConfig")
      .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
      .field("base_url", &self.base_url)
      .field("model", &self.model)
      .field("temperature", &self.temperature)
      .field("timeout_secs", &self.timeout_secs)
      .finish()
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
  model:       &'a str,
  messages:    &'a [ChatMessage],
  #[serde(skip_serializing_if = "Option::is_none")]
  temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
  #[serde(default)]
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

// ─── Provider ────────────────────────────────────────────────────────────────

/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct OpenRouterProvider {
  client: Client,
  config: ProviderConfig,
}

impl OpenRouterProvider {
  pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| ProviderError::Transport(e.to_string()))?;
    Ok(Self { client, config })
  }

  fn endpoint(&self) -> String {
    format!(
      "{}/chat/completions",
      self.config.base_url.trim_end_matches('/')
    )
  }

  fn api_key(&self) -> Option<&str> {
    self.config.api_key.as_deref().filter(|k| !k.trim().is_empty())
  }
}

fn map_send_error(e: reqwest::Error) -> ProviderError {
  if e.is_timeout() {
    ProviderError::Timeout
  } else {
    ProviderError::Transport(e.to_string())
  }
}

impl CompletionProvider for OpenRouterProvider {
  fn is_configured(&self) -> bool { self.api_key().is_some() }

  async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
    let api_key = self.api_key().ok_or(ProviderError::MissingCredential)?;

    let body = ChatCompletionBody {
      model:       &self.config.model,
      messages:    &request.messages,
      temperature: self.config.temperature,
    };

    tracing::debug!(
      model = %self.config.model,
      messages = request.messages.len(),
      "calling completion endpoint"
    );

    let resp = self
      .client
      .post(self.endpoint())
      .bearer_auth(api_key)
      .json(&body)
      .send()
      .await
      .map_err(map_send_error)?;

    let status = resp.status();
    if !status.is_success() {
      let body = match resp.text().await {
        Ok(body) => body,
        Err(e) => {
          tracing::debug!(status = status.as_u16(), error = %e, "failed to read error body");
          String::new()
        }
      };
      return Err(ProviderError::Status { status: status.as_u16(), body });
    }

    let parsed: ChatCompletionResponse = resp.json().await.map_err(|e| {
      if e.is_timeout() {
        ProviderError::Timeout
      } else {
        ProviderError::MalformedResponse(e.to_string())
      }
    })?;

    parsed
      .choices
      .into_iter()
      .next()
      .and_then(|c| c.message.content)
      .ok_or_else(|| ProviderError::MalformedResponse("no message content in response".into()))
  }
}
