use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── OPTION KEYS ───────────────────────────────────────────────────────────────
//

/// Label of one of the four choices of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
            OptionKey::D => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }

    /// Case-insensitive key lookup, used for keyboard shortcuts.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionKey::A),
            'B' => Some(OptionKey::B),
            'C' => Some(OptionKey::C),
            'D' => Some(OptionKey::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid option key: {0:?}")]
pub struct ParseOptionKeyError(String);

impl FromStr for OptionKey {
    type Err = ParseOptionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or_else(|| ParseOptionKeyError(s.to_string())),
            _ => Err(ParseOptionKeyError(s.to_string())),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question as shown to the player.
///
/// There is no answer key here; grading happens in the question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; 4],
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, prompt: impl Into<String>, options: [String; 4]) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options,
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn option(&self, key: OptionKey) -> &str {
        &self.options[key.index()]
    }

    /// Choices in display order (A to D).
    pub fn options(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL
            .into_iter()
            .map(move |key| (key, self.option(key)))
    }
}
