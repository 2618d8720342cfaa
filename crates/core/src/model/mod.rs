mod answer;
mod ids;
mod phase;
mod question;
mod session;

pub use answer::{AnswerEntry, AnswerError, AnswerSheet};
pub use ids::{PlayerId, PlayerIdError, QuestionId};
pub use phase::GamePhase;
pub use question::{OptionKey, ParseOptionKeyError, Question};
pub use session::{SessionResult, SessionResultError};
