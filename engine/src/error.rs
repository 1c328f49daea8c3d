//! Error types for the strategy engine
//!
//! Planning, simulation, live play, and the history codec each get their own
//! enum so callers can match on the failure they actually care about.

use crate::candidates::CoinIndex;
use thiserror::Error;

/// Errors raised by the planner and the simulator on invalid input.
///
/// All variants are "invalid input" conditions: the engine never clamps or
/// wraps an out-of-range value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid coin count {0}: at least one coin is required")]
    InvalidCoinCount(u32),

    #[error("too many coins: {total} (at most {max})")]
    TooManyCoins { total: u32, max: u32 },

    #[error("fake coin {index} is outside [0, {total})")]
    FakeCoinOutOfRange { index: CoinIndex, total: u32 },

    #[error("cannot plan a weighing for an empty candidate set")]
    EmptyCandidateSet,

    #[error("coin {index} is outside [0, {total})")]
    CoinOutOfRange { index: CoinIndex, total: u32 },
}

impl EngineError {
    /// True for every variant that signals caller-supplied input was invalid.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidCoinCount(_)
                | EngineError::TooManyCoins { .. }
                | EngineError::FakeCoinOutOfRange { .. }
                | EngineError::EmptyCandidateSet
                | EngineError::CoinOutOfRange { .. }
        )
    }
}

/// Errors raised by a live [`GameSession`](crate::session::GameSession).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("place coins on both sides of the scale")]
    EmptyPan,

    #[error("place an equal number of coins on both sides ({left} vs {right})")]
    UnequalPans { left: usize, right: usize },

    #[error("coin {0} cannot sit on both pans")]
    CoinOnBothPans(CoinIndex),

    #[error("coin {0} was placed on a pan twice")]
    DuplicateCoin(CoinIndex),

    #[error("coin {index} is outside [0, {total})")]
    CoinOutOfRange { index: CoinIndex, total: u32 },

    #[error("the game is already over")]
    GameOver,

    #[error("all {0} hints have been used")]
    HintsExhausted(u32),

    #[error("only one candidate remains; make your final guess")]
    AlreadySolved,

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors raised while reading or writing a persisted move history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access history file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown weighing result text: {0:?}")]
    UnknownOutcome(String),

    #[error("history is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("history is inconsistent: {0}")]
    InvalidCoin(#[from] EngineError),
}

pub type EngineResult<T> = Result<T, EngineError>;
