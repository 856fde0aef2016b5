//! Handler for `POST /chat`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use tem_core::{provider::CompletionProvider, store::ConversationStore};
use tem_mentor::{MentorReply, MentorService};

use crate::{DEFAULT_USER, Success, error::ApiError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatBody {
  /// Missing is treated like empty and rejected by the service.
  pub message: String,
  pub user_id: Option<String>,
}

/// `POST /chat` — body: `{"message": "...", "user_id": "..."}`
pub async fn handler<S, P>(
  State(service): State<Arc<MentorService<S, P>>>,
  payload: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<Success<MentorReply>>, ApiError>
where
  S: ConversationStore,
  P: CompletionProvider,
{
  let Json(body) = payload?;
  let user_id = body.user_id.as_deref().unwrap_or(DEFAULT_USER);

  let reply = service.respond(user_id, &body.message).await?;
  Ok(Json(Success::new(reply)))
}
