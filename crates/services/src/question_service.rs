use std::collections::HashSet;

use async_trait::async_trait;

use quiz_core::model::{AnswerEntry, PlayerId, Question, SessionResult};

use crate::error::QuestionServiceError;

/// Everything the grader needs for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub player_id: PlayerId,
    pub answers: Vec<AnswerEntry>,
    pub elapsed_secs: u32,
    pub was_overtime: bool,
}

/// Source of questions and grader of answers.
///
/// Grading is opaque to the client. Implementations echo `elapsed_secs`
/// and `was_overtime` from the request into the result unchanged.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Fetch up to `count` random questions from the bank named `bank_name`.
    async fn fetch_questions(
        &self,
        bank_name: &str,
        count: u32,
    ) -> Result<Vec<Question>, QuestionServiceError>;

    /// Grade a completed answer sheet.
    async fn submit_answers(
        &self,
        request: &SubmitRequest,
    ) -> Result<SessionResult, QuestionServiceError>;
}

/// Enforce the shape of a fetched set: non-empty, unique ids, at most `count`.
///
/// # Errors
///
/// Returns `QuestionServiceError::NoQuestions` for an empty set and
/// `QuestionServiceError::DuplicateQuestion` when an id repeats.
pub fn normalize_question_set(
    mut questions: Vec<Question>,
    count: u32,
) -> Result<Vec<Question>, QuestionServiceError> {
    questions.truncate(count as usize);
    if questions.is_empty() {
        return Err(QuestionServiceError::NoQuestions);
    }

    let mut seen = HashSet::with_capacity(questions.len());
    for question in &questions {
        if !seen.insert(question.id()) {
            return Err(QuestionServiceError::DuplicateQuestion(question.id().clone()));
        }
    }

    Ok(questions)
}
