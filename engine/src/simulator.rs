//! Optimal-play simulation
//!
//! Replays the planner's equal-halves rule against a known fake coin. The
//! outcome of each weighing comes from ground truth, so the trace never
//! guesses wrong. Every branch holds at most `floor(n / 2)` candidates, which
//! keeps the trace within `ceil(log2 N)` weighings; a fake coin that sits in
//! the leftover is found in fewer.

use crate::candidates::{CandidateSet, CoinIndex};
use crate::error::{EngineError, EngineResult};
use crate::planner::SplitPlanner;
use crate::weighing::{MoveHistory, Outcome, Weighing};
use tracing::debug;

/// Largest table the engine will plan for.
pub const MAX_COINS: u32 = 1 << 20;

/// Reject coin counts outside `1..=MAX_COINS`.
pub fn validate_coin_count(total_coins: u32) -> EngineResult<()> {
    if total_coins < 1 {
        return Err(EngineError::InvalidCoinCount(total_coins));
    }
    if total_coins > MAX_COINS {
        return Err(EngineError::TooManyCoins {
            total: total_coins,
            max: MAX_COINS,
        });
    }
    Ok(())
}

/// Reject a coin outside `[0, total_coins)`.
pub fn validate_coin(coin: CoinIndex, total_coins: u32) -> EngineResult<()> {
    if coin >= total_coins {
        return Err(EngineError::CoinOutOfRange {
            index: coin,
            total: total_coins,
        });
    }
    Ok(())
}

/// Reject coin counts and fake-coin indices outside the puzzle's domain.
pub fn validate_game(total_coins: u32, fake_coin: CoinIndex) -> EngineResult<()> {
    validate_coin_count(total_coins)?;
    if fake_coin >= total_coins {
        return Err(EngineError::FakeCoinOutOfRange {
            index: fake_coin,
            total: total_coins,
        });
    }
    Ok(())
}

/// Drives a [`SplitPlanner`] through a full game.
#[derive(Debug, Default)]
pub struct WeighingSimulator {
    planner: SplitPlanner,
}

impl WeighingSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing planner (and its memo table).
    pub fn with_planner(planner: SplitPlanner) -> Self {
        WeighingSimulator { planner }
    }

    pub fn planner(&self) -> &SplitPlanner {
        &self.planner
    }

    pub fn into_planner(self) -> SplitPlanner {
        self.planner
    }

    /// Produce the optimal move history for `fake_coin` among `total_coins`.
    pub fn simulate(&mut self, total_coins: u32, fake_coin: CoinIndex) -> EngineResult<MoveHistory> {
        validate_game(total_coins, fake_coin)?;

        let mut history = MoveHistory::new(total_coins, fake_coin);
        let mut candidates = CandidateSet::full(total_coins);
        let mut step = 0;

        while candidates.len() > 1 {
            let split = self.planner.plan(&candidates)?;
            let partition = split.partition(&candidates);
            let outcome = Outcome::observe(&partition.left, &partition.right, fake_coin);
            let remaining = outcome.narrow(&candidates, &partition.left, &partition.right);
            step += 1;
            debug!(step, %outcome, before = candidates.len(), after = remaining.len(), "simulated weighing");

            history.push(Weighing {
                step,
                left_pan: partition.left,
                right_pan: partition.right,
                outcome,
                remaining: remaining.clone(),
            });
            candidates = remaining;
        }

        history.final_guess = candidates.sole();
        Ok(history)
    }
}
