//! Conversation turns and the per-user counter derived from them.
//!
//! Turns are immutable. The only deletion is a bulk purge of every turn
//! belonging to one user, which also drops that user's stats record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One learner message together with the mentor's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
  /// Store-assigned, strictly increasing. Ordering is always by this id,
  /// never by `timestamp`.
  pub id:           i64,
  pub user_id:      String,
  pub user_message: String,
  pub ai_response:  String,
  /// Server-assigned at write time; serialised as RFC 3339.
  pub timestamp:    DateTime<Utc>,
}

/// Per-user counter maintained alongside every saved turn.
///
/// `total_conversations` always equals the number of stored turns for
/// `user_id`; both are written in the same transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
  pub user_id:             String,
  pub total_conversations: u64,
  pub last_active:         DateTime<Utc>,
}
