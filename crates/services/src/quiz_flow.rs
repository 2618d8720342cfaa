use std::sync::Arc;

use quiz_core::QuizConfig;
use quiz_core::model::{
    AnswerSheet, GamePhase, OptionKey, PlayerId, Question, SessionResult,
};

use crate::error::{FlowError, QuestionServiceError};
use crate::question_service::{SubmitRequest, normalize_question_set};
use crate::tracker::TrackerEvent;

/// Issued on entering `Loading`; hand it back with the fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub bank_name: String,
    pub count: u32,
}

/// Issued on entering `Submitting`; hand it back with the grading outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
    pub request: SubmitRequest,
}

/// What `QuizFlow::advance` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Submit(SubmitTicket),
}

/// Whether an async outcome was applied or arrived too late to matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    Stale,
}

/// Phase state machine of a quiz run.
///
/// All transitions are synchronous. Network calls happen between a ticket
/// and the matching `apply_*`; outcomes for tickets from an earlier
/// phase (or a run that was restarted) are dropped.
#[derive(Debug, Clone)]
pub struct QuizFlow {
    config: Arc<QuizConfig>,
    phase: GamePhase,
    generation: u64,
    player_id: Option<PlayerId>,
    player_id_draft: String,
    questions: Vec<Question>,
    answers: AnswerSheet,
    current: usize,
    elapsed_secs: u32,
    overtime: bool,
    result: Option<SessionResult>,
    error: Option<FlowError>,
}

impl QuizFlow {
    #[must_use]
    pub fn new(config: Arc<QuizConfig>) -> Self {
        Self {
            config,
            phase: GamePhase::Idle,
            generation: 0,
            player_id: None,
            player_id_draft: String::new(),
            questions: Vec::new(),
            answers: AnswerSheet::default(),
            current: 0,
            elapsed_secs: 0,
            overtime: false,
            result: None,
            error: None,
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Idle → Loading for a valid player id.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidPlayerId` for a blank id (no transition) and
    /// `FlowError::WrongPhase` outside `Idle`.
    pub fn begin(&mut self, raw_player_id: &str) -> Result<FetchTicket, FlowError> {
        self.expect_phase(GamePhase::Idle, "starting a quiz")?;
        let player_id = PlayerId::parse(raw_player_id)?;

        self.player_id_draft = player_id.as_str().to_string();
        self.player_id = Some(player_id);
        self.error = None;
        self.generation += 1;
        self.set_phase(GamePhase::Loading);

        Ok(FetchTicket {
            generation: self.generation,
            bank_name: self.config.question_bank().to_string(),
            count: self.config.question_count(),
        })
    }

    /// Loading → Playing on success, Loading → Idle with an overlay on failure.
    ///
    /// The set is cut to `question_count`; an empty set or a repeated id
    /// counts as a failed fetch.
    pub fn apply_fetch(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Vec<Question>, QuestionServiceError>,
    ) -> Applied {
        if !self.is_current(ticket.generation, GamePhase::Loading) {
            tracing::debug!(phase = %self.phase, "ignoring stale fetch outcome");
            return Applied::Stale;
        }

        let count = self.config.question_count();
        match outcome.and_then(|questions| normalize_question_set(questions, count)) {
            Ok(questions) => {
                self.answers = AnswerSheet::for_questions(&questions);
                self.questions = questions;
                self.current = 0;
                self.elapsed_secs = 0;
                self.overtime = false;
                self.set_phase(GamePhase::Playing);
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load questions");
                self.fail_fetch();
            }
        }
        Applied::Applied
    }

    /// Choose an option for the current question.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongPhase` outside `Playing`.
    pub fn select_answer(&mut self, key: OptionKey) -> Result<(), FlowError> {
        self.expect_phase(GamePhase::Playing, "answering")?;
        let Some(question) = self.questions.get(self.current) else {
            return Err(self.wrong_phase("answering"));
        };
        self.answers.select(question.id(), key)?;
        Ok(())
    }

    /// Move to the next question, or submit from the last one.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Unanswered` if the current question has no choice
    /// and `FlowError::WrongPhase` outside `Playing`.
    pub fn advance(&mut self) -> Result<Advance, FlowError> {
        self.expect_phase(GamePhase::Playing, "advancing")?;
        if !self.can_advance() {
            return Err(FlowError::Unanswered);
        }

        if !self.is_last_question() {
            self.current += 1;
            return Ok(Advance::Next {
                index: self.current,
            });
        }

        let Some(player_id) = self.player_id.clone() else {
            return Err(self.wrong_phase("submitting"));
        };
        let request = SubmitRequest {
            player_id,
            answers: self.answers.entries().to_vec(),
            elapsed_secs: self.elapsed_secs,
            was_overtime: self.overtime,
        };
        self.error = None;
        self.generation += 1;
        self.set_phase(GamePhase::Submitting);

        Ok(Advance::Submit(SubmitTicket {
            generation: self.generation,
            request,
        }))
    }

    /// Submitting → Result on success, Submitting → Playing with an overlay
    /// on failure (answers are kept for a resubmit).
    pub fn apply_submit(
        &mut self,
        ticket: &SubmitTicket,
        outcome: Result<SessionResult, QuestionServiceError>,
    ) -> Applied {
        if !self.is_current(ticket.generation, GamePhase::Submitting) {
            tracing::debug!(phase = %self.phase, "ignoring stale submit outcome");
            return Applied::Stale;
        }

        match outcome {
            Ok(result) => {
                tracing::info!(
                    score = result.score(),
                    total = result.total(),
                    passed = result.passed(),
                    "quiz graded"
                );
                self.result = Some(result);
                self.set_phase(GamePhase::Result);
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to submit answers");
                self.error = Some(FlowError::Submit);
                self.set_phase(GamePhase::Playing);
            }
        }
        Applied::Applied
    }

    /// Record a tracker notification. Ignored outside `Playing`.
    pub fn record_tick(&mut self, event: TrackerEvent) {
        if self.phase != GamePhase::Playing {
            return;
        }
        match event {
            TrackerEvent::Elapsed(elapsed) => self.elapsed_secs = elapsed,
            TrackerEvent::Exceeded { elapsed } => {
                self.elapsed_secs = elapsed;
                if !self.overtime {
                    tracing::info!(elapsed_secs = elapsed, "time limit reached");
                }
                self.overtime = true;
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Back to `Idle` from anywhere, dropping everything from the run.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.player_id = None;
        self.player_id_draft.clear();
        self.questions.clear();
        self.answers = AnswerSheet::default();
        self.current = 0;
        self.elapsed_secs = 0;
        self.overtime = false;
        self.result = None;
        self.error = None;
        self.set_phase(GamePhase::Idle);
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn player_id(&self) -> Option<&PlayerId> {
        self.player_id.as_ref()
    }

    /// Value to pre-fill the entry form with.
    #[must_use]
    pub fn player_id_draft(&self) -> &str {
        &self.player_id_draft
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn current_choice(&self) -> Option<OptionKey> {
        self.current_question()
            .and_then(|question| self.answers.choice(question.id()))
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.phase == GamePhase::Playing && self.current_choice().is_some()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn is_overtime(&self) -> bool {
        self.overtime
    }

    #[must_use]
    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }

    //
    // ─── HELPERS ───────────────────────────────────────────────────────────────
    //

    fn fail_fetch(&mut self) {
        // The typed id stays in `player_id_draft` so the form comes back filled.
        self.player_id = None;
        self.error = Some(FlowError::Fetch);
        self.set_phase(GamePhase::Idle);
    }

    fn is_current(&self, generation: u64, phase: GamePhase) -> bool {
        self.generation == generation && self.phase == phase
    }

    fn expect_phase(&self, phase: GamePhase, action: &'static str) -> Result<(), FlowError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(self.wrong_phase(action))
        }
    }

    fn wrong_phase(&self, action: &'static str) -> FlowError {
        FlowError::WrongPhase {
            action,
            phase: self.phase,
        }
    }

    fn set_phase(&mut self, next: GamePhase) {
        if self.phase != next {
            tracing::info!(from = %self.phase, to = %next, "quiz phase changed");
        }
        self.phase = next;
    }
}
