//! [`SqliteStore`] — the SQLite implementation of [`ConversationStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;
use tem_core::{
  store::ConversationStore,
  turn::{ConversationTurn, UserStats},
};

use crate::{
  Result,
  encode::{RawStats, RawTurn, decode_counter, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A conversation store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// are serialised on the connection's dedicated thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// Missing parent directories are created.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }

    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened conversation store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Run arbitrary SQL against the connection.
  #[cfg(test)]
  pub(crate) async fn execute_raw(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ConversationStore impl ──────────────────────────────────────────────────

impl ConversationStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn save(
    &self,
    user_id:      String,
    user_message: String,
    ai_response:  String,
  ) -> Result<ConversationTurn> {
    // Truncated to the precision `encode_dt` stores.
    let timestamp = Utc::now().trunc_subsecs(6);
    let at_str    = encode_dt(timestamp);

    let turn = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        tx.execute(
          "INSERT INTO conversations (user_id, user_message, ai_response, timestamp)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![user_id, user_message, ai_response, at_str],
        )?;
        let id = tx.last_insert_rowid();

        tx.execute(
          "INSERT INTO user_stats (user_id, total_conversations, last_active)
           VALUES (?1, 1, ?2)
           ON CONFLICT(user_id) DO UPDATE SET
             total_conversations = total_conversations + 1,
             last_active         = excluded.last_active",
          rusqlite::params![user_id, at_str],
        )?;

        tx.commit()?;

        Ok(ConversationTurn {
          id,
          user_id,
          user_message,
          ai_response,
          timestamp,
        })
      })
      .await?;

    tracing::debug!(user_id = %turn.user_id, id = turn.id, "saved turn");
    Ok(turn)
  }

  async fn clear(&self, user_id: String) -> Result<()> {
    let (user_id, deleted) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "DELETE FROM conversations WHERE user_id = ?1",
          rusqlite::params![user_id],
        )?;
        tx.execute(
          "DELETE FROM user_stats WHERE user_id = ?1",
          rusqlite::params![user_id],
        )?;
        tx.commit()?;
        Ok((user_id, n))
      })
      .await?;

    tracing::debug!(user_id = %user_id, deleted, "cleared history");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn history(&self, user_id: String, limit: usize) -> Result<Vec<ConversationTurn>> {
    if limit == 0 {
      return Ok(Vec::new());
    }
    let limit_val = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawTurn> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, user_id, user_message, ai_response, timestamp
           FROM conversations
           WHERE user_id = ?1
           ORDER BY id DESC
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_id, limit_val], RawTurn::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    // Newest-first from the query; callers want oldest-first.
    let mut turns = raws
      .into_iter()
      .map(RawTurn::into_turn)
      .collect::<Result<Vec<_>>>()?;
    turns.reverse();
    Ok(turns)
  }

  async fn count(&self, user_id: String) -> Result<u64> {
    let key = user_id.clone();
    let total: Option<i64> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT total_conversations FROM user_stats WHERE user_id = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    total.map_or(Ok(0), |n| decode_counter(&user_id, n))
  }

  async fn stats(&self, user_id: String) -> Result<Option<UserStats>> {
    let raw: Option<RawStats> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, total_conversations, last_active
               FROM user_stats WHERE user_id = ?1",
              rusqlite::params![user_id],
              RawStats::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStats::into_stats).transpose()
  }

  async fn list_users(&self) -> Result<Vec<UserStats>> {
    let raws: Vec<RawStats> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT user_id, total_conversations, last_active
           FROM user_stats
           ORDER BY last_active DESC",
        )?;
        let rows = stmt
          .query_map([], RawStats::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStats::into_stats).collect()
  }
}
