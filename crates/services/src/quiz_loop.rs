use std::sync::Arc;

use quiz_core::model::{Question, SessionResult};

use crate::error::{FlowError, QuestionServiceError};
use crate::question_service::{QuestionBank, normalize_question_set};
use crate::quiz_flow::{Advance, Applied, FetchTicket, QuizFlow, SubmitTicket};

/// Runs the network half of quiz transitions against a question bank.
#[derive(Clone)]
pub struct QuizLoopService {
    bank: Arc<dyn QuestionBank>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(bank: Arc<dyn QuestionBank>) -> Self {
        Self { bank }
    }

    #[must_use]
    pub fn bank(&self) -> &Arc<dyn QuestionBank> {
        &self.bank
    }

    /// Fetch the question set a `FetchTicket` asks for.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError` for transport failures, rejected
    /// requests, or a set that is empty or repeats an id.
    pub async fn load(&self, ticket: &FetchTicket) -> Result<Vec<Question>, QuestionServiceError> {
        let questions = self
            .bank
            .fetch_questions(&ticket.bank_name, ticket.count)
            .await?;
        normalize_question_set(questions, ticket.count)
    }

    /// Grade the answers a `SubmitTicket` carries.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError` for transport failures or rejected
    /// submissions.
    pub async fn submit(
        &self,
        ticket: &SubmitTicket,
    ) -> Result<SessionResult, QuestionServiceError> {
        self.bank.submit_answers(&ticket.request).await
    }

    /// Begin a quiz and load its questions in one step.
    ///
    /// A failed fetch is not an error here; it lands in `flow.error()`.
    ///
    /// # Errors
    ///
    /// Returns `FlowError` when the flow refuses to begin.
    pub async fn start(&self, flow: &mut QuizFlow, raw_player_id: &str) -> Result<Applied, FlowError> {
        let ticket = flow.begin(raw_player_id)?;
        let outcome = self.load(&ticket).await;
        Ok(flow.apply_fetch(&ticket, outcome))
    }

    /// Advance the flow, submitting and applying the grade from the last
    /// question.
    ///
    /// # Errors
    ///
    /// Returns `FlowError` when the flow refuses to advance.
    pub async fn advance(&self, flow: &mut QuizFlow) -> Result<Advance, FlowError> {
        let step = flow.advance()?;
        if let Advance::Submit(ticket) = &step {
            let outcome = self.submit(ticket).await;
            flow.apply_submit(ticket, outcome);
        }
        Ok(step)
    }
}
