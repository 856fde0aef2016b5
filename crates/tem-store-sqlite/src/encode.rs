//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings so that
//! lexicographic order matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use tem_core::turn::{ConversationTurn, UserStats};

use crate::{Error, Result};

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Counter ──────────────────────────────────────────────────────────────────

pub fn decode_counter(user_id: &str, value: i64) -> Result<u64> {
  u64::try_from(value).map_err(|_| Error::InvalidCounter {
    user_id: user_id.to_owned(),
    value,
  })
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// A `conversations` row as read from SQLite.
pub struct RawTurn {
  pub id:           i64,
  pub user_id:      String,
  pub user_message: String,
  pub ai_response:  String,
  pub timestamp:    String,
}

impl RawTurn {
  /// Column order: `id, user_id, user_message, ai_response, timestamp`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      user_id:      row.get(1)?,
      user_message: row.get(2)?,
      ai_response:  row.get(3)?,
      timestamp:    row.get(4)?,
    })
  }

  pub fn into_turn(self) -> Result<ConversationTurn> {
    Ok(ConversationTurn {
      id:           self.id,
      user_id:      self.user_id,
      user_message: self.user_message,
      ai_response:  self.ai_response,
      timestamp:    decode_dt(&self.timestamp)?,
    })
  }
}

/// A `user_stats` row as read from SQLite.
pub struct RawStats {
  pub user_id:             String,
  pub total_conversations: i64,
  pub last_active:         String,
}

impl RawStats {
  /// Column order: `user_id, total_conversations, last_active`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:             row.get(0)?,
      total_conversations: row.get(1)?,
      last_active:         row.get(2)?,
    })
  }

  pub fn into_stats(self) -> Result<UserStats> {
    Ok(UserStats {
      total_conversations: decode_counter(&self.user_id, self.total_conversations)?,
      last_active:         decode_dt(&self.last_active)?,
      user_id:             self.user_id,
    })
  }
}
