//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{AnswerError, GamePhase, PlayerIdError, QuestionId, SessionResultError};

/// Errors emitted by question banks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error("question bank request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("question bank rejected the request: {0}")]
    Rejected(String),
    #[error("question bank returned a malformed response: {0}")]
    MalformedResponse(String),
    #[error("question bank returned no questions")]
    NoQuestions,
    #[error("question bank returned question {0} more than once")]
    DuplicateQuestion(QuestionId),
    #[error(transparent)]
    InvalidResult(#[from] SessionResultError),
}

/// Errors emitted by `QuizFlow`.
///
/// `Fetch` and `Submit` are shown to the player as an overlay; the
/// underlying `QuestionServiceError` is logged, not displayed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlowError {
    #[error(transparent)]
    InvalidPlayerId(#[from] PlayerIdError),
    #[error("Failed to load questions. Please try again later.")]
    Fetch,
    #[error("Failed to submit answers. Please try again later.")]
    Submit,
    #[error("choose an answer before continuing")]
    Unanswered,
    #[error("{action} is not allowed while the quiz is {phase}")]
    WrongPhase {
        action: &'static str,
        phase: GamePhase,
    },
    #[error(transparent)]
    Answer(#[from] AnswerError),
}

impl FlowError {
    /// Errors that belong in the dismissible overlay rather than inline.
    #[must_use]
    pub fn is_overlay(&self) -> bool {
        matches!(self, FlowError::Fetch | FlowError::Submit)
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}
