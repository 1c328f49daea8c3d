//! Hypothesis sweeps
//!
//! The analysis view lets a player pick any coin as the fake one and see the
//! optimal trace for it. A sweep runs that simulation for every hypothesis at
//! once. Each hypothesis is independent, so they are spread over Rayon's
//! thread pool; every task builds its own [`WeighingSimulator`] and no memo
//! table is shared between threads.

use crate::candidates::CoinIndex;
use crate::error::EngineResult;
use crate::planner::optimal_weighings;
use crate::simulator::{validate_coin_count, WeighingSimulator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Weighings needed for each possible fake coin, summarized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub total_coins: u32,
    /// `steps[i]` is the trace length when coin `i` is fake
    pub steps: Vec<u32>,
    pub min_steps: u32,
    pub max_steps: u32,
    pub mean_steps: f64,
    /// `ceil(log2 N)`
    pub optimal_bound: u32,
    /// Hypotheses whose trace is longer than `optimal_bound`
    pub over_bound: usize,
}

/// Simulate optimal play for every fake-coin hypothesis in parallel.
pub fn sweep_hypotheses(total_coins: u32) -> EngineResult<SweepSummary> {
    validate_coin_count(total_coins)?;

    let steps: Vec<u32> = (0..total_coins)
        .into_par_iter()
        .map(|fake: CoinIndex| {
            WeighingSimulator::new()
                .simulate(total_coins, fake)
                .map(|history| history.len() as u32)
        })
        .collect::<EngineResult<Vec<u32>>>()?;

    let optimal_bound = optimal_weighings(total_coins);
    let min_steps = steps.iter().copied().min().unwrap_or(0);
    let max_steps = steps.iter().copied().max().unwrap_or(0);
    let mean_steps = steps.iter().map(|&s| s as f64).sum::<f64>() / steps.len() as f64;
    let over_bound = steps.iter().filter(|&&s| s > optimal_bound).count();

    Ok(SweepSummary {
        total_coins,
        steps,
        min_steps,
        max_steps,
        mean_steps,
        optimal_bound,
        over_bound,
    })
}

/// Time `rounds` full simulations over `total_coins`, cycling through fake
/// coins with a fresh planner each round.
///
/// Returns `(simulations_per_sec, duration_ms)`.
pub fn benchmark_throughput(total_coins: u32, rounds: usize) -> EngineResult<(f64, u64)> {
    validate_coin_count(total_coins)?;

    // Warm-up
    for fake in 0..total_coins.min(1_000) {
        WeighingSimulator::new().simulate(total_coins, fake)?;
    }

    let start = Instant::now();
    let mut weighings = 0usize;
    for i in 0..rounds {
        let fake = (i as u64 % total_coins as u64) as CoinIndex;
        weighings += WeighingSimulator::new().simulate(total_coins, fake)?.len();
    }
    let elapsed = start.elapsed();
    std::hint::black_box(weighings);

    let secs = elapsed.as_secs_f64().max(f64::EPSILON);
    Ok((rounds as f64 / secs, elapsed.as_millis() as u64))
}
