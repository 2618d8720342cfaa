use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier of a question within a fetched set.
///
/// The question bank decides the shape (spreadsheet row numbers or text keys),
/// so both are accepted and written back exactly as they were received.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl QuestionId {
    #[must_use]
    pub fn number(value: i64) -> Self {
        Self::Number(value)
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({self})")
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{n}"),
            QuestionId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Player identifier typed into the entry form (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Validate a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns `PlayerIdError::Empty` if nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self, PlayerIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlayerIdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerIdError {
    #[error("please enter your ID")]
    Empty,
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
