//! The `ConversationStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `tem-store-sqlite`).
//! Higher layers (`tem-mentor`, `tem-api`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::turn::{ConversationTurn, UserStats};

/// Abstraction over a durable, append-only conversation log.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ConversationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Append a turn and increment (or create) the user's stats record.
  ///
  /// Both writes are atomic: no reader ever observes one without the other.
  /// The id and timestamp are assigned by the store.
  fn save(
    &self,
    user_id: String,
    user_message: String,
    ai_response: String,
  ) -> impl Future<Output = Result<ConversationTurn, Self::Error>> + Send + '_;

  /// Delete every turn and the stats record for `user_id`.
  ///
  /// Idempotent: clearing an unknown user succeeds.
  fn clear(
    &self,
    user_id: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Up to `limit` most recent turns for `user_id`, oldest first.
  fn history(
    &self,
    user_id: String,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<ConversationTurn>, Self::Error>> + Send + '_;

  /// Total turns recorded for `user_id`; `0` if the user is unknown.
  fn count(
    &self,
    user_id: String,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// The stats record for `user_id`, if the user has ever interacted.
  fn stats(
    &self,
    user_id: String,
  ) -> impl Future<Output = Result<Option<UserStats>, Self::Error>> + Send + '_;

  /// Every stats record, most recently active first.
  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<UserStats>, Self::Error>> + Send + '_;
}
