use thiserror::Error;

use crate::model::{OptionKey, Question, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("question {0} is not part of this quiz")]
    UnknownQuestion(QuestionId),
}

/// The player's choice for one question; `None` means unanswered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerEntry {
    pub question_id: QuestionId,
    pub chosen: Option<OptionKey>,
}

/// One entry per question, kept in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    entries: Vec<AnswerEntry>,
}

impl AnswerSheet {
    /// Start an empty sheet for the given questions.
    #[must_use]
    pub fn for_questions(questions: &[Question]) -> Self {
        let entries = questions
            .iter()
            .map(|question| AnswerEntry {
                question_id: question.id().clone(),
                chosen: None,
            })
            .collect();
        Self { entries }
    }

    /// Record (or replace) the choice for a question.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::UnknownQuestion` if the id is not on this sheet.
    pub fn select(&mut self, question_id: &QuestionId, key: OptionKey) -> Result<(), AnswerError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.question_id == *question_id)
            .ok_or_else(|| AnswerError::UnknownQuestion(question_id.clone()))?;
        entry.chosen = Some(key);
        Ok(())
    }

    #[must_use]
    pub fn choice(&self, question_id: &QuestionId) -> Option<OptionKey> {
        self.entries
            .iter()
            .find(|entry| entry.question_id == *question_id)
            .and_then(|entry| entry.chosen)
    }

    #[must_use]
    pub fn entries(&self) -> &[AnswerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.chosen.is_some())
            .count()
    }
}
