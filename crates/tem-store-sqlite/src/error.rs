//! Error type for `tem-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored counter that cannot be represented as `u64`.
  #[error("invalid counter for {user_id}: {value}")]
  InvalidCounter { user_id: String, value: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
