use quiz_core::time::phrase;
use quiz_core::{ConfigIssue, QuizConfig};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub rules: Vec<String>,
    pub time_rule: String,
    pub time_note: Option<&'static str>,
    pub warnings: Vec<String>,
}

impl HomeVm {
    #[must_use]
    pub fn new(config: &QuizConfig, issues: &[ConfigIssue]) -> Self {
        let rules = vec![
            format!(
                "Each quiz draws {} random questions.",
                config.question_count()
            ),
            "Every question is guarded by its own stage keeper.".to_string(),
            "Pick the answer you believe is correct.".to_string(),
            format!(
                "Answer {} correctly to pass the challenge.",
                config.pass_threshold()
            ),
        ];
        let (time_rule, time_note) = if config.is_time_limited() {
            (
                format!("Time limit: {}", phrase(config.time_limit_secs())),
                Some("You can keep answering after time runs out, but the result is marked overtime."),
            )
        } else {
            ("No time limit this round. Take your time!".to_string(), None)
        };

        Self {
            rules,
            time_rule,
            time_note,
            warnings: issues.iter().map(ToString::to_string).collect(),
        }
    }
}
