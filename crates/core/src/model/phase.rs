use std::fmt;

/// Top-level phase of a quiz run. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GamePhase {
    #[default]
    Idle,
    Loading,
    Playing,
    Submitting,
    Result,
}

impl GamePhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Loading => "loading",
            GamePhase::Playing => "playing",
            GamePhase::Submitting => "submitting",
            GamePhase::Result => "result",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
