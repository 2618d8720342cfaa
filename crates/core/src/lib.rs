#![forbid(unsafe_code)]

pub mod avatar;
pub mod config;
pub mod model;
pub mod time;

pub use config::{ConfigIssue, ConfigLoad, QuizConfig};
