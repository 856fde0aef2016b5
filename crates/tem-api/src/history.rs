//! Handlers for conversation history.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/history` | Optional `?user_id`, `?limit` (default 20) |
//! | `POST` | `/clear_history` | Body: `{"user_id":"..."}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tem_core::{provider::CompletionProvider, store::ConversationStore, turn::ConversationTurn};
use tem_mentor::MentorService;

use crate::{DEFAULT_USER, Success, error::ApiError};

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
  pub user_id: Option<String>,
  pub limit:   Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryBody {
  pub history: Vec<HistoryItem>,
}

/// Wire form of a turn; the owner is implied by the request.
#[derive(Debug, Serialize)]
pub struct HistoryItem {
  pub id:           i64,
  pub user_message: String,
  pub ai_response:  String,
  pub timestamp:    DateTime<Utc>,
}

impl From<ConversationTurn> for HistoryItem {
  fn from(turn: ConversationTurn) -> Self {
    Self {
      id:           turn.id,
      user_message: turn.user_message,
      ai_response:  turn.ai_response,
      timestamp:    turn.timestamp,
    }
  }
}

/// `GET /history[?user_id=...][&limit=...]` — oldest turn first.
pub async fn list<S, P>(
  State(service): State<Arc<MentorService<S, P>>>,
  params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<Success<HistoryBody>>, ApiError>
where
  S: ConversationStore,
  P: CompletionProvider,
{
  let Query(params) = params?;
  let user_id = params.user_id.as_deref().unwrap_or(DEFAULT_USER);
  let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

  let history = service
    .history(user_id, limit)
    .await?
    .into_iter()
    .map(HistoryItem::from)
    .collect();
  Ok(Json(Success::new(HistoryBody { history })))
}

// ─── Clear ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClearBody {
  pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearedBody {
  pub message: &'static str,
}

/// `POST /clear_history` — idempotent.
pub async fn clear<S, P>(
  State(service): State<Arc<MentorService<S, P>>>,
  payload: Result<Json<ClearBody>, JsonRejection>,
) -> Result<Json<Success<ClearedBody>>, ApiError>
where
  S: ConversationStore,
  P: CompletionProvider,
{
  let Json(body) = payload?;
  let user_id = body.user_id.as_deref().unwrap_or(DEFAULT_USER);

  service.clear(user_id).await?;
  Ok(Json(Success::new(ClearedBody {
    message: "History cleared successfully",
  })))
}
