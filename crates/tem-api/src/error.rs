//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is rendered as `{"error": true, "message": "..."}`.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use tem_mentor::MentorError;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Mentor(#[from] MentorError),
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Mentor(MentorError::Validation(m)) => (StatusCode::BAD_REQUEST, m),
      ApiError::Mentor(e @ MentorError::Config(_)) => {
        tracing::error!(error = %e, "service misconfigured");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
      ApiError::Mentor(e @ MentorError::Upstream { .. }) => {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
      ApiError::Mentor(e @ MentorError::Store(_)) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Server error: {e}"))
      }
    };
    (status, Json(json!({ "error": true, "message": message }))).into_response()
  }
}
