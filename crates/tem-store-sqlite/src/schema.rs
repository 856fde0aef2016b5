//! SQL schema for the TEM SQLite store.
//!
//! Executed once at connection startup. Changes are additive only; the
//! version is tracked in `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Turns are append-only; the only DELETE is a per-user purge.
CREATE TABLE IF NOT EXISTS conversations (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id       TEXT NOT NULL,
    user_message  TEXT NOT NULL,
    ai_response   TEXT NOT NULL,
    timestamp     TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

-- total_conversations always equals COUNT(*) of the user's turns.
CREATE TABLE IF NOT EXISTS user_stats (
    user_id             TEXT PRIMARY KEY,
    total_conversations INTEGER NOT NULL DEFAULT 0,
    last_active         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS conversations_user_idx      ON conversations(user_id);
CREATE INDEX IF NOT EXISTS conversations_timestamp_idx ON conversations(timestamp);

PRAGMA user_version = 1;
";
