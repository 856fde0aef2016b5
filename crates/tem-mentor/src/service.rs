//! [`MentorService`] — builds the bounded context, calls the provider once and
//! records the turn.

use std::sync::Arc;

use rand_core::{OsRng, RngCore};
use serde::Serialize;
use tem_core::{
  level::Level,
  message::{ChatMessage, UserMessage},
  provider::{CompletionProvider, CompletionRequest},
  store::ConversationStore,
  turn::{ConversationTurn, UserStats},
};

use crate::{MentorError, Result, prompt::SYSTEM_PROMPT};

pub const DEFAULT_CONTEXT_TURNS: usize = 10;

// ─── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct MentorConfig {
  /// How many stored turns are replayed to the provider.
  pub context_turns: usize,
}

impl Default for MentorConfig {
  fn default() -> Self { Self { context_turns: DEFAULT_CONTEXT_TURNS } }
}

/// The outcome of a successful [`MentorService::respond`].
#[derive(Debug, Clone, Serialize)]
pub struct MentorReply {
  pub response:           String,
  pub level:              Level,
  pub conversation_count: u64,
}

/// A learner's progress summary.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
  pub level:                Level,
  pub conversation_count:   u64,
  pub motivational_message: &'static str,
}

// ─── Service ──────────────────────────────────────────────────────────────────

pub struct MentorService<S, P> {
  store:    Arc<S>,
  provider: Arc<P>,
  config:   MentorConfig,
}

impl<S, P> MentorService<S, P>
where
  S: ConversationStore,
  P: CompletionProvider,
{
  pub fn new(store: Arc<S>, provider: Arc<P>, config: MentorConfig) -> Self {
    Self { store, provider, config }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Answer `message` on behalf of `user_id`.
  ///
  /// Nothing is written unless the provider succeeds.
  pub async fn respond(&self, user_id: &str, message: &str) -> Result<MentorReply> {
    let message = UserMessage::new(message)?;

    if !self.provider.is_configured() {
      tracing::warn!("completion provider has no API key");
      return Err(MentorError::from(
        tem_core::provider::ProviderError::MissingCredential,
      ));
    }

    let history = self
      .store
      .history(user_id.to_owned(), self.config.context_turns)
      .await
      .map_err(MentorError::store)?;

    let request = CompletionRequest {
      messages: build_context(&history, message.clone()),
    };

    tracing::info!(
      user_id,
      turns = history.len(),
      "requesting mentor reply"
    );

    let response = self.provider.complete(request).await.map_err(|e| {
      tracing::warn!(user_id, error = %e, "completion failed");
      MentorError::from(e)
    })?;

    self
      .store
      .save(user_id.to_owned(), message.content, response.clone())
      .await
      .map_err(MentorError::store)?;

    let conversation_count = self
      .store
      .count(user_id.to_owned())
      .await
      .map_err(MentorError::store)?;

    Ok(MentorReply {
      response,
      level: Level::from_count(conversation_count),
      conversation_count,
    })
  }

  pub async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<ConversationTurn>> {
    self
      .store
      .history(user_id.to_owned(), limit)
      .await
      .map_err(MentorError::store)
  }

  pub async fn stats(&self, user_id: &str) -> Result<StatsReport> {
    let conversation_count = self
      .store
      .count(user_id.to_owned())
      .await
      .map_err(MentorError::store)?;
    let level = Level::from_count(conversation_count);

    Ok(StatsReport {
      level,
      conversation_count,
      motivational_message: pick_encouragement(level, &mut OsRng),
    })
  }

  pub async fn clear(&self, user_id: &str) -> Result<()> {
    self
      .store
      .clear(user_id.to_owned())
      .await
      .map_err(MentorError::store)?;
    tracing::info!(user_id, "history cleared");
    Ok(())
  }

  pub async fn users(&self) -> Result<Vec<UserStats>> {
    self.store.list_users().await.map_err(MentorError::store)
  }
}

/// System preamble, then each stored turn as a user/assistant pair, then the
/// new message.
pub fn build_context(history: &[ConversationTurn], message: UserMessage) -> Vec<ChatMessage> {
  let mut messages = Vec::with_capacity(history.len() * 2 + 2);
  messages.push(ChatMessage::system(SYSTEM_PROMPT));
  messages.extend(history.iter().flat_map(ChatMessage::from_turn));
  messages.push(message.into());
  messages
}

fn pick_encouragement<R: RngCore>(level: Level, rng: &mut R) -> &'static str {
  let options = level.encouragements();
  options[rng.next_u32() as usize % options.len()]
}

// ─── Tests ────────────────────────────────────────────────────────────────────
