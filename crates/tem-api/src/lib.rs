//! JSON REST API for TEM.
//!
//! Exposes an axum [`Router`] backed by a [`MentorService`].
//! Transport concerns (CORS, static files, tracing) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tem_api::api_router(service.clone()))
//! ```

pub mod chat;
pub mod error;
pub mod history;
pub mod stats;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use serde::Serialize;
use tem_core::{provider::CompletionProvider, store::ConversationStore};
use tem_mentor::MentorService;

pub use error::ApiError;

/// User id assumed when a request does not name one.
pub const DEFAULT_USER: &str = "default_user";

/// Successful response envelope: `{"error": false, ...body}`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
  error: bool,
  #[serde(flatten)]
  body:  T,
}

impl<T> Success<T> {
  pub fn new(body: T) -> Self { Self { error: false, body } }
}

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, P>(service: Arc<MentorService<S, P>>) -> Router<()>
where
  S: ConversationStore + 'static,
  P: CompletionProvider + 'static,
{
  Router::new()
    .route("/chat", post(chat::handler::<S, P>))
    .route("/history", get(history::list::<S, P>))
    .route("/clear_history", post(history::clear::<S, P>))
    .route("/stats", get(stats::handler::<S, P>))
    .route("/users", get(stats::users::<S, P>))
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────
