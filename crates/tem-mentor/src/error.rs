//! Error taxonomy for mentor operations.

use tem_core::provider::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MentorError {
  /// Empty or missing input. Correctable by the learner.
  #[error("{0}")]
  Validation(String),

  /// Missing credential or similar. Correctable by the operator.
  #[error("{0}")]
  Config(String),

  /// The completion provider failed or timed out.
  #[error("{message}")]
  Upstream { status: Option<u16>, message: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl MentorError {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl From<tem_core::Error> for MentorError {
  fn from(e: tem_core::Error) -> Self {
    match e {
      tem_core::Error::EmptyMessage => Self::Validation("Message cannot be empty".into()),
    }
  }
}

impl From<ProviderError> for MentorError {
  fn from(e: ProviderError) -> Self {
    match e {
      ProviderError::MissingCredential => Self::Config(
        "API key not configured. Please set OPENROUTER_API_KEY environment variable.".into(),
      ),
      other => Self::Upstream {
        status:  other.status(),
        message: other.to_string(),
      },
    }
  }
}

pub type Result<T, E = MentorError> = std::result::Result<T, E>;
