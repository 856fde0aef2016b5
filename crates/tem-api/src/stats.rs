//! Handlers for learner progress.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use tem_core::{provider::CompletionProvider, store::ConversationStore, turn::UserStats};
use tem_mentor::{MentorService, StatsReport};

use crate::{DEFAULT_USER, Success, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct StatsParams {
  pub user_id: Option<String>,
}

/// `GET /stats[?user_id=...]`
pub async fn handler<S, P>(
  State(service): State<Arc<MentorService<S, P>>>,
  params: Result<Query<StatsParams>, QueryRejection>,
) -> Result<Json<Success<StatsReport>>, ApiError>
where
  S: ConversationStore,
  P: CompletionProvider,
{
  let Query(params) = params?;
  let user_id = params.user_id.as_deref().unwrap_or(DEFAULT_USER);

  let report = service.stats(user_id).await?;
  Ok(Json(Success::new(report)))
}

#[derive(Debug, Serialize)]
pub struct UsersBody {
  pub users: Vec<UserStats>,
}

/// `GET /users` — every learner, most recently active first.
pub async fn users<S, P>(
  State(service): State<Arc<MentorService<S, P>>>,
) -> Result<Json<Success<UsersBody>>, ApiError>
where
  S: ConversationStore,
  P: CompletionProvider,
{
  let users = service.users().await?;
  Ok(Json(Success::new(UsersBody { users })))
}
