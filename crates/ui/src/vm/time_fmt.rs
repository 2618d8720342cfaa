use quiz_core::time::{clock_string, phrase};
use services::tracker::display_secs;

/// `MM:SS` shown by the quiz timer: remaining time when limited, elapsed otherwise.
#[must_use]
pub fn timer_label(limit_secs: u32, elapsed_secs: u32) -> String {
    clock_string(display_secs(limit_secs, elapsed_secs))
}

/// Completion time on the result screen.
#[must_use]
pub fn completion_label(elapsed_secs: u32, was_overtime: bool) -> String {
    let text = phrase(elapsed_secs);
    if was_overtime {
        format!("{text} (overtime)")
    } else {
        text
    }
}
