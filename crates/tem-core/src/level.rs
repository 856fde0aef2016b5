//! Progress levels derived from the cumulative turn count.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Highest count that still maps to [`Level::Beginner`].
pub const BEGINNER_MAX: u64 = 20;

/// Highest count that still maps to [`Level::Intermediate`].
pub const INTERMEDIATE_MAX: u64 = 50;

/// A coarse progress label. Derived solely from the number of turns a
/// learner has completed; never stored.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
pub enum Level {
  Beginner,
  Intermediate,
  Advanced,
}

impl Level {
  /// `count <= 20` is Beginner, `count <= 50` is Intermediate, anything
  /// above is Advanced.
  pub fn from_count(count: u64) -> Self {
    match count {
      0..=BEGINNER_MAX => Self::Beginner,
      c if c <= INTERMEDIATE_MAX => Self::Intermediate,
      _ => Self::Advanced,
    }
  }

  /// Short encouragements shown alongside a learner's stats.
  pub fn encouragements(self) -> &'static [&'static str] {
    match self {
      Self::Beginner => &[
        "Great start! Keep practicing daily!",
        "You're building a strong foundation!",
        "Every conversation makes you better!",
      ],
      Self::Intermediate => &[
        "Excellent progress! You're getting fluent!",
        "Your confidence is growing!",
        "Keep up the amazing work!",
      ],
      Self::Advanced => &[
        "Outstanding! You're nearly fluent!",
        "You're an inspiration to other learners!",
        "Your English skills are impressive!",
      ],
    }
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn boundaries() {
    assert_eq!(Level::from_count(0), Level::Beginner);
    assert_eq!(Level::from_count(20), Level::Beginner);
    assert_eq!(Level::from_count(21), Level::Intermediate);
    assert_eq!(Level::from_count(50), Level::Intermediate);
    assert_eq!(Level::from_count(51), Level::Advanced);
    assert_eq!(Level::from_count(u64::MAX), Level::Advanced);
  }

  #[test]
  fn label_roundtrip() {
    assert_eq!(Level::Intermediate.to_string(), "Intermediate");
    assert_eq!(Level::from_str("Advanced").unwrap(), Level::Advanced);
    assert_eq!(
      serde_json::to_string(&Level::Beginner).unwrap(),
      "\"Beginner\""
    );
  }

  #[test]
  fn every_level_has_encouragements() {
    for level in [Level::Beginner, Level::Intermediate, Level::Advanced] {
      assert_eq!(level.encouragements().len(), 3);
    }
  }
}
