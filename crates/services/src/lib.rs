#![forbid(unsafe_code)]

pub mod error;
pub mod http_bank;
pub mod question_service;
pub mod quiz_flow;
pub mod quiz_loop;
pub mod sample_bank;
pub mod tracker;

pub use error::{FlowError, QuestionServiceError};
pub use http_bank::HttpQuestionBank;
pub use question_service::{QuestionBank, SubmitRequest, normalize_question_set};
pub use quiz_flow::{Advance, Applied, FetchTicket, QuizFlow, SubmitTicket};
pub use quiz_loop::QuizLoopService;
pub use sample_bank::SampleQuestionBank;
pub use tracker::{ElapsedTracker, ObserverSlot, Tick, Tracker, TrackerEvent};
