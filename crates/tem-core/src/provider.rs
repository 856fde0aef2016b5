//! The `CompletionProvider` trait and its error type.
//!
//! A provider turns an ordered list of [`ChatMessage`]s into a single reply.
//! Exactly one attempt is made per call; retries are never performed here.

use std::future::Future;

use thiserror::Error;

use crate::message::ChatMessage;

/// The full context sent to a provider.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
  pub messages: Vec<ChatMessage>,
}

/// Why a completion could not be produced.
#[derive(Debug, Error)]
pub enum ProviderError {
  /// No API credential is configured. Raised before any network call.
  #[error("API key not configured")]
  MissingCredential,

  /// The provider answered with a non-2xx status.
  #[error("API error: {status} - {body}")]
  Status { status: u16, body: String },

  #[error("Request timeout. Please try again.")]
  Timeout,

  #[error("transport error: {0}")]
  Transport(String),

  /// A 2xx response without a usable `choices[0].message.content`.
  #[error("malformed response: {0}")]
  MalformedResponse(String),
}

impl ProviderError {
  /// The upstream HTTP status, when there was one.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

/// Abstraction over an external chat-completion API.
pub trait CompletionProvider: Send + Sync {
  /// Whether a credential is available. Callers check this before building a
  /// request so that a misconfigured service never reaches the network.
  fn is_configured(&self) -> bool;

  /// Produce the reply text for `request`.
  fn complete(
    &self,
    request: CompletionRequest,
  ) -> impl Future<Output = Result<String, ProviderError>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timeout_message_is_user_facing() {
    assert_eq!(
      ProviderError::Timeout.to_string(),
      "Request timeout. Please try again."
    );
  }
}
