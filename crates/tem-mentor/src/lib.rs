//! Mentor orchestration for TEM.
//!
//! [`MentorService`] glues a [`ConversationStore`](tem_core::store::ConversationStore)
//! to a [`CompletionProvider`](tem_core::provider::CompletionProvider):
//! it windows the stored history, asks the provider for a reply, persists the
//! turn and reports the learner's level. [`OpenRouterProvider`] is the
//! production provider.

pub mod error;
pub mod openrouter;
pub mod prompt;
pub mod service;

pub use error::{MentorError, Result};
pub use openrouter::{OpenRouterProvider, ProviderConfig};
pub use service::{MentorConfig, MentorReply, MentorService, StatsReport};
