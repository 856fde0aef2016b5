//! Role-tagged chat messages sent to a completion provider.
//!
//! Each role has its own record type; they are collected into an ordered
//! `Vec<ChatMessage>` and serialised as `{"role": ..., "content": ...}`.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, turn::ConversationTurn};

/// The fixed instruction that frames the whole conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessage {
  pub content: String,
}

/// Something the learner said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
  pub content: String,
}

/// Something the mentor replied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
  pub content: String,
}

impl UserMessage {
  /// Trim `raw` and reject it if nothing is left.
  pub fn new(raw: &str) -> Result<Self> {
    let content = raw.trim();
    if content.is_empty() {
      return Err(Error::EmptyMessage);
    }
    Ok(Self { content: content.to_owned() })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
  System(SystemMessage),
  User(UserMessage),
  Assistant(AssistantMessage),
}

impl ChatMessage {
  pub fn system(content: impl Into<String>) -> Self {
    Self::System(SystemMessage { content: content.into() })
  }

  pub fn user(content: impl Into<String>) -> Self {
    Self::User(UserMessage { content: content.into() })
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    Self::Assistant(AssistantMessage { content: content.into() })
  }

  pub fn content(&self) -> &str {
    match self {
      Self::System(m) => &m.content,
      Self::User(m) => &m.content,
      Self::Assistant(m) => &m.content,
    }
  }

  /// Flatten a stored turn into its user/assistant pair.
  pub fn from_turn(turn: &ConversationTurn) -> [Self; 2] {
    [
      Self::user(turn.user_message.clone()),
      Self::assistant(turn.ai_response.clone()),
    ]
  }
}

impl From<UserMessage> for ChatMessage {
  fn from(m: UserMessage) -> Self { Self::User(m) }
}
