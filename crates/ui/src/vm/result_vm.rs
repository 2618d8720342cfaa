use quiz_core::model::SessionResult;

use crate::vm::time_fmt::completion_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub passed: bool,
    pub badge: &'static str,
    pub score_label: String,
    pub percentage_label: String,
    pub correct: u32,
    pub wrong: u32,
    pub threshold: u32,
    pub time_caption: &'static str,
    pub time_label: String,
    pub overtime: bool,
    pub first_pass: bool,
}

impl ResultVm {
    #[must_use]
    pub fn new(result: &SessionResult, pass_threshold: u32) -> Self {
        let overtime = result.was_overtime();
        Self {
            passed: result.passed(),
            badge: if result.passed() {
                "Challenge passed!"
            } else {
                "Keep going!"
            },
            score_label: format!("{} / {}", result.score(), result.total()),
            percentage_label: format!("{}%", result.percentage()),
            correct: result.score(),
            wrong: result.wrong(),
            threshold: pass_threshold,
            time_caption: if overtime {
                "Total time"
            } else {
                "Completed in"
            },
            time_label: completion_label(result.elapsed_secs(), overtime),
            overtime,
            first_pass: result.passed() && result.is_first_pass(),
        }
    }
}
