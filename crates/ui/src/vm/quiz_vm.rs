use quiz_core::avatar::avatar_url;
use quiz_core::model::OptionKey;
use services::QuizFlow;
use services::tracker::progress_percent;

use crate::vm::time_fmt::timer_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: OptionKey,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerVm {
    pub caption: &'static str,
    pub value: String,
    pub overtime: bool,
    /// Width of the limit bar; `None` hides it.
    pub progress_percent: Option<u32>,
}

impl TimerVm {
    #[must_use]
    pub fn new(limit_secs: u32, elapsed_secs: u32, overtime: bool) -> Self {
        let caption = if limit_secs > 0 {
            "Time left"
        } else {
            "Time spent"
        };
        Self {
            caption,
            value: timer_label(limit_secs, elapsed_secs),
            overtime,
            progress_percent: progress_percent(limit_secs, elapsed_secs),
        }
    }
}

/// Everything the quiz screen shows for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub stage: usize,
    pub total: usize,
    pub progress_label: String,
    pub progress_percent: usize,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub can_advance: bool,
    pub advance_label: &'static str,
    pub avatar_url: String,
    pub timer: TimerVm,
}

impl QuizVm {
    /// `None` when there is no current question.
    #[must_use]
    pub fn from_flow(flow: &QuizFlow) -> Option<Self> {
        let question = flow.current_question()?;
        let index = flow.current_index();
        let total = flow.total_questions();
        let chosen = flow.current_choice();

        let options = question
            .options()
            .map(|(key, text)| OptionVm {
                key,
                text: text.to_string(),
                selected: chosen == Some(key),
            })
            .collect();

        Some(Self {
            stage: index + 1,
            total,
            progress_label: format!("{} / {total}", index + 1),
            progress_percent: (index + 1) * 100 / total.max(1),
            prompt: question.prompt().to_string(),
            options,
            can_advance: flow.can_advance(),
            advance_label: if flow.is_last_question() {
                "Submit"
            } else {
                "Next"
            },
            avatar_url: avatar_url(index),
            timer: TimerVm::new(
                flow.config().time_limit_secs(),
                flow.elapsed_secs(),
                flow.is_overtime(),
            ),
        })
    }
}
