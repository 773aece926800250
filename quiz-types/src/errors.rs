use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum QuizError {
    #[error("player career must contain at least one club")]
    EmptyCareer,
    #[error("store error: {message}")]
    Store { message: String },
    #[error("serialization error: {message}")]
    Serialization { message: String },
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: String, value: String },
    #[error("score submission failed: {message}")]
    ScoreSubmission { message: String },
}
