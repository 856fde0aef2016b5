//! Error types for `tem-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// The learner's message was empty or whitespace-only.
  #[error("message cannot be empty")]
  EmptyMessage,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
