use thiserror::Error;

use crate::scenario::ScenarioKey;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Invalid hand: {0}")]
    InvalidHand(String),

    #[error("Invalid range notation: {0}")]
    InvalidRangeNotation(String),

    #[error("Frequencies for {hand} sum to {sum:.4}, expected 100")]
    InvalidDistribution { hand: String, sum: f64 },

    #[error("Negative or non-finite frequency {frequency} for {hand}")]
    NegativeFrequency { hand: String, frequency: f64 },

    #[error("{action} requires a sizing ({context})")]
    MissingSizing { action: String, context: String },

    #[error("Action {action} listed twice for {hand}")]
    DuplicateAction { hand: String, action: String },

    #[error("Hand {0} appears in more than one entry")]
    DuplicateHand(String),

    #[error("Hand {0} is missing from the distribution")]
    MissingHand(String),

    #[error("Invalid stack: {0}")]
    InvalidStack(f64),

    #[error("Pot must be positive, got {0}")]
    InvalidPot(f64),

    #[error("Scenario not supported: no reference range for {0}")]
    NoReferenceRange(ScenarioKey),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse grouping callers use to decide how to present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied malformed input and must fix it.
    Validation,
    /// The input is fine but no precomputed content covers it.
    DataGap,
    /// Loading external data failed.
    Io,
}

impl GradeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GradeError::NoReferenceRange(_) => ErrorKind::DataGap,
            GradeError::JsonError(_) | GradeError::IoError(_) => ErrorKind::Io,
            _ => ErrorKind::Validation,
        }
    }
}

pub type GradeResult<T> = Result<T, GradeError>;
