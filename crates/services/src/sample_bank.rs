use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{OptionKey, Question, QuestionId, SessionResult};

use crate::error::QuestionServiceError;
use crate::question_service::{QuestionBank, SubmitRequest};

struct SampleQuestion {
    question: Question,
    key: OptionKey,
}

/// Built-in question bank used when no grading endpoint is configured.
///
/// Grades against its own answer keys and remembers, per player id, whether
/// the player has passed before (in memory only).
pub struct SampleQuestionBank {
    questions: Vec<SampleQuestion>,
    pass_threshold: u32,
    latency: Duration,
    shuffle: bool,
    passed_players: Mutex<HashSet<String>>,
}

impl SampleQuestionBank {
    #[must_use]
    pub fn new(pass_threshold: u32) -> Self {
        Self {
            questions: sample_questions(),
            pass_threshold,
            latency: Duration::ZERO,
            shuffle: true,
            passed_players: Mutex::new(HashSet::new()),
        }
    }

    /// Delay every call, to make loading screens visible during development.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Serve questions in their built-in order instead of shuffling.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Answer key for a sample question.
    #[must_use]
    pub fn key_for(&self, id: &QuestionId) -> Option<OptionKey> {
        self.questions
            .iter()
            .find(|sample| sample.question.id() == id)
            .map(|sample| sample.key)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl QuestionBank for SampleQuestionBank {
    async fn fetch_questions(
        &self,
        bank_name: &str,
        count: u32,
    ) -> Result<Vec<Question>, QuestionServiceError> {
        self.simulate_latency().await;

        let mut picked: Vec<Question> = self
            .questions
            .iter()
            .map(|sample| sample.question.clone())
            .collect();
        if self.shuffle {
            let mut rng = rng();
            picked.as_mut_slice().shuffle(&mut rng);
        }
        picked.truncate(count as usize);

        tracing::debug!(bank = bank_name, served = picked.len(), "sample questions served");
        Ok(picked)
    }

    async fn submit_answers(
        &self,
        request: &SubmitRequest,
    ) -> Result<SessionResult, QuestionServiceError> {
        self.simulate_latency().await;

        let mut score = 0_u32;
        for entry in &request.answers {
            let key = self.key_for(&entry.question_id).ok_or_else(|| {
                QuestionServiceError::Rejected(format!("unknown question {}", entry.question_id))
            })?;
            if entry.chosen == Some(key) {
                score = score.saturating_add(1);
            }
        }

        let total = u32::try_from(request.answers.len()).map_err(|_| {
            QuestionServiceError::Rejected("too many answers".to_string())
        })?;
        let passed = score >= self.pass_threshold;
        let is_first_pass = passed
            && self
                .passed_players
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(request.player_id.as_str().to_string());

        let result = SessionResult::new(
            score,
            total,
            passed,
            is_first_pass,
            request.elapsed_secs,
            request.was_overtime,
        )?;
        Ok(result)
    }
}

fn sample(id: i64, prompt: &str, options: [&str; 4], key: OptionKey) -> SampleQuestion {
    SampleQuestion {
        question: Question::new(QuestionId::number(id), prompt, options.map(str::to_string)),
        key,
    }
}

fn sample_questions() -> Vec<SampleQuestion> {
    vec![
        sample(
            1,
            "Which of these is a core idea of React?",
            ["Two-way binding", "Virtual DOM", "MVC architecture", "Dependency injection"],
            OptionKey::B,
        ),
        sample(
            2,
            "Which JavaScript keyword declares a constant?",
            ["var", "let", "const", "static"],
            OptionKey::C,
        ),
        sample(
            3,
            "Which CSS Flexbox property aligns items along the main axis?",
            ["align-items", "justify-content", "align-content", "flex-direction"],
            OptionKey::B,
        ),
        sample(
            4,
            "What does HTTP status code 404 mean?",
            ["Server error", "Unauthorized", "Resource not found", "Success"],
            OptionKey::C,
        ),
        sample(
            5,
            "Which Git command merges branches?",
            ["git branch", "git merge", "git commit", "git push"],
            OptionKey::B,
        ),
        sample(
            6,
            "Which is the package manager that ships with Node.js?",
            ["pip", "gem", "npm", "composer"],
            OptionKey::C,
        ),
        sample(
            7,
            "What is the GET method used for in a RESTful API?",
            ["Creating data", "Updating data", "Deleting data", "Reading data"],
            OptionKey::D,
        ),
        sample(
            8,
            "What is async/await used for?",
            [
                "Synchronous code",
                "Asynchronous code",
                "Error handling",
                "Loop control",
            ],
            OptionKey::B,
        ),
        sample(
            9,
            "When is data in localStorage cleared?",
            [
                "When the browser closes",
                "When the tab closes",
                "When cleared manually or with browser data",
                "On every page refresh",
            ],
            OptionKey::C,
        ),
        sample(
            10,
            "What does JSON stand for?",
            [
                "JavaScript Object Notation",
                "Java Standard Object Notation",
                "JavaScript Oriented Network",
                "Java Serialized Object Name",
            ],
            OptionKey::A,
        ),
    ]
}
