use std::sync::Arc;

use quiz_core::{ConfigIssue, QuizConfig};
use services::{QuestionBank, QuizLoopService};

pub trait UiApp: Send + Sync {
    fn config(&self) -> Arc<QuizConfig>;
    fn question_bank(&self) -> Arc<dyn QuestionBank>;

    /// Problems found while loading configuration, shown on the home screen.
    fn config_issues(&self) -> Vec<ConfigIssue> {
        Vec::new()
    }
}

#[derive(Clone)]
pub struct AppContext {
    config: Arc<QuizConfig>,
    config_issues: Arc<[ConfigIssue]>,
    quiz_loop: QuizLoopService,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            config: app.config(),
            config_issues: app.config_issues().into(),
            quiz_loop: QuizLoopService::new(app.question_bank()),
        }
    }

    #[must_use]
    pub fn config(&self) -> Arc<QuizConfig> {
        Arc::clone(&self.config)
    }

    #[must_use]
    pub fn config_issues(&self) -> &[ConfigIssue] {
        &self.config_issues
    }

    #[must_use]
    pub fn quiz_loop(&self) -> QuizLoopService {
        self.quiz_loop.clone()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
