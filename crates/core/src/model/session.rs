use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionResultError {
    #[error("score ({score}) is greater than total ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },
}

/// Graded outcome of one quiz session.
///
/// `elapsed_secs` and `was_overtime` are what the client reported at
/// submission; the grader does not check them against its own clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    score: u32,
    total: u32,
    passed: bool,
    is_first_pass: bool,
    elapsed_secs: u32,
    was_overtime: bool,
}

impl SessionResult {
    /// Build a result from grader output plus the client's timing.
    ///
    /// # Errors
    ///
    /// Returns `SessionResultError::ScoreExceedsTotal` if `score > total`.
    pub fn new(
        score: u32,
        total: u32,
        passed: bool,
        is_first_pass: bool,
        elapsed_secs: u32,
        was_overtime: bool,
    ) -> Result<Self, SessionResultError> {
        if score > total {
            return Err(SessionResultError::ScoreExceedsTotal { score, total });
        }
        Ok(Self {
            score,
            total,
            passed,
            is_first_pass,
            elapsed_secs,
            was_overtime,
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub fn is_first_pass(&self) -> bool {
        self.is_first_pass
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn was_overtime(&self) -> bool {
        self.was_overtime
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.total - self.score
    }

    /// Score as a rounded percentage; 0 for an empty quiz.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        // Integer round-half-up of score * 100 / total.
        let score = u64::from(self.score);
        let total = u64::from(self.total);
        let percent = (score * 200 + total) / (total * 2);
        percent.min(100) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_nearest() {
        let result = SessionResult::new(6, 10, true, true, 0, false).unwrap();
        assert_eq!(result.percentage(), 60);
        assert_eq!(result.wrong(), 4);

        let third = SessionResult::new(1, 3, false, false, 0, false).unwrap();
        assert_eq!(third.percentage(), 33);

        let two_thirds = SessionResult::new(2, 3, false, false, 0, false).unwrap();
        assert_eq!(two_thirds.percentage(), 67);
    }

    #[test]
    fn percentage_handles_large_totals() {
        let full = SessionResult::new(30_000_000, 30_000_000, true, true, 0, false).unwrap();
        assert_eq!(full.percentage(), 100);

        let half = SessionResult::new(u32::MAX / 2, u32::MAX, false, false, 0, false).unwrap();
        assert_eq!(half.percentage(), 50);
    }

    #[test]
    fn empty_quiz_has_zero_percentage() {
        let result = SessionResult::new(0, 0, false, false, 0, false).unwrap();
        assert_eq!(result.percentage(), 0);
    }

    #[test]
    fn score_above_total_is_rejected() {
        let err = SessionResult::new(11, 10, true, true, 5, false).unwrap_err();
        assert_eq!(
            err,
            SessionResultError::ScoreExceedsTotal {
                score: 11,
                total: 10
            }
        );
    }
}
