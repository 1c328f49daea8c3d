//! Balance Engine - Core strategy types and logic
//!
//! This crate contains the lighter-fake-coin strategy engine: candidate-set
//! utilities, the memoized split planner, the optimal-play simulator, and the
//! live game session that records move histories for later analysis.
//!
//! The engine is synchronous and has zero UI dependencies.

pub mod advice;
pub mod candidates;
pub mod error;
pub mod history;
pub mod planner;
pub mod session;
pub mod simulator;
pub mod sweep;
pub mod weighing;

pub use candidates::{CandidateSet, CoinIndex, Partition};
pub use error::{EngineError, EngineResult, HistoryError, SessionError};
pub use planner::{Split, SplitPlanner};
pub use simulator::WeighingSimulator;
pub use weighing::{MoveHistory, Outcome, Weighing};

/// Plan the next weighing for `candidates` with a throwaway planner.
///
/// Long-lived callers should keep a [`SplitPlanner`] per game session to
/// benefit from memoization.
pub fn plan_split(candidates: &CandidateSet) -> EngineResult<Split> {
    SplitPlanner::new().plan(candidates)
}

/// Regenerate the canonical optimal trace for one fake-coin hypothesis.
pub fn simulate_optimal_play(total_coins: u32, fake_coin: CoinIndex) -> EngineResult<MoveHistory> {
    WeighingSimulator::new().simulate(total_coins, fake_coin)
}
