//! Split planning with a per-session memo table
//!
//! The planner always weighs two equal halves of the candidate set (taken in
//! ascending order) and keeps any odd coin off the scale. Results are cached
//! by the candidate set's canonical key for the lifetime of the planner, so
//! callers create one planner per game session instead of sharing a global
//! table.

use crate::candidates::{CandidateSet, CoinIndex, Partition};
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// `ceil(log2(k))` for `k >= 1`; 0 for `k <= 1`.
pub fn ceil_log2(k: usize) -> u32 {
    if k <= 1 {
        0
    } else {
        k.next_power_of_two().trailing_zeros()
    }
}

/// Weighings an ideal binary search needs for `n` coins.
///
/// This is the "optimal attempts" reference shown to players and used for
/// performance ratings.
pub fn optimal_weighings(n: u32) -> u32 {
    ceil_log2(n as usize)
}

/// Two-outcome entropy of splitting `total` candidates into a group of
/// `split_size` and the rest.
pub fn information_gain(total: usize, split_size: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let term = |p: f64| if p > 0.0 { p * p.log2() } else { 0.0 };
    let p1 = split_size as f64 / total as f64;
    let p2 = (total - split_size) as f64 / total as f64;
    -(term(p1) + term(p2))
}

/// Recommended weighing for a candidate set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Coins for the left pan. Empty when the set is already solved.
    pub left_group: Vec<CoinIndex>,
    /// Upper bound on weighings still needed
    pub worst_case_steps: u32,
    /// Advisory only; never used to choose the split
    pub information_gain_bits: f64,
}

impl Split {
    fn solved() -> Self {
        Split {
            left_group: Vec::new(),
            worst_case_steps: 0,
            information_gain_bits: 0.0,
        }
    }

    /// Derive both pans and the leftover for the set this split was planned for.
    pub fn partition(&self, candidates: &CandidateSet) -> Partition {
        candidates.partition(self.left_group.len())
    }

    /// Everything in `candidates` not on the left pan (right pan plus leftover).
    pub fn complement(&self, candidates: &CandidateSet) -> CandidateSet {
        candidates.difference(&[self.left_group.as_slice()])
    }

    pub fn is_solved(&self) -> bool {
        self.left_group.is_empty()
    }
}

/// Equal-halves split planner with memoization by candidate-set key.
#[derive(Debug, Default)]
pub struct SplitPlanner {
    memo: HashMap<String, Split>,
    hits: u64,
}

impl SplitPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan the next weighing for `candidates`.
    ///
    /// Fails with [`EngineError::EmptyCandidateSet`] on an empty set; a set of
    /// one coin is already solved and yields an empty left group.
    pub fn plan(&mut self, candidates: &CandidateSet) -> EngineResult<Split> {
        if candidates.is_empty() {
            return Err(EngineError::EmptyCandidateSet);
        }
        if candidates.len() == 1 {
            return Ok(Split::solved());
        }

        let key = candidates.key();
        if let Some(split) = self.memo.get(&key) {
            self.hits += 1;
            debug!(key = %key, "split planner memo hit");
            return Ok(split.clone());
        }

        let n = candidates.len();
        let group_size = n / 2;
        let partition = candidates.partition(group_size);
        let leftover_steps = if partition.leftover.is_empty() {
            0
        } else {
            ceil_log2(partition.leftover.len())
        };
        let worst_case_steps = 1 + ceil_log2(partition.left.len().max(1))
            .max(ceil_log2(partition.right.len().max(1)))
            .max(leftover_steps);

        let split = Split {
            left_group: partition.left,
            worst_case_steps,
            information_gain_bits: information_gain(n, group_size),
        };
        debug!(
            candidates = n,
            group_size,
            worst_case_steps,
            gain = split.information_gain_bits,
            "planned split"
        );
        self.memo.insert(key, split.clone());
        Ok(split)
    }

    /// Plan for coins given in any order.
    pub fn plan_coins(&mut self, coins: &[CoinIndex]) -> EngineResult<Split> {
        self.plan(&CandidateSet::new(coins.to_vec()))
    }

    /// Number of memoized subproblems.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    /// Lookups answered from the memo table since creation or the last clear.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Drop every cached split, e.g. between independent games.
    pub fn clear(&mut self) {
        self.memo.clear();
        self.hits = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(8), 3);
    }

    #[test]
    fn test_empty_set_is_invalid() {
        let mut planner = SplitPlanner::new();
        let err = planner.plan(&CandidateSet::default()).unwrap_err();
        assert_eq!(err, EngineError::EmptyCandidateSet);
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_single_candidate_is_solved() {
        let mut planner = SplitPlanner::new();
        let split = planner.plan(&CandidateSet::single(4)).unwrap();
        assert!(split.is_solved());
        assert_eq!(split.worst_case_steps, 0);
        assert_eq!(split.information_gain_bits, 0.0);
        assert!(planner.is_empty());
    }

    #[test]
    fn test_eight_coins() {
        let mut planner = SplitPlanner::new();
        let split = planner.plan(&CandidateSet::full(8)).unwrap();
        assert_eq!(split.left_group, vec![0, 1, 2, 3]);
        assert_eq!(split.worst_case_steps, 3);
        assert!((split.information_gain_bits - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nine_coins_leftover() {
        let mut planner = SplitPlanner::new();
        let set = CandidateSet::full(9);
        let split = planner.plan(&set).unwrap();
        let partition = split.partition(&set);
        assert_eq!(partition.right, vec![4, 5, 6, 7]);
        assert_eq!(partition.leftover, vec![8]);
        assert_eq!(split.worst_case_steps, 3);
        // -(4/9 log2 4/9 + 5/9 log2 5/9)
        assert!((split.information_gain_bits - 0.991_076).abs() < 1e-6);
        assert_eq!(split.complement(&set).len(), 5);
    }

    #[test]
    fn test_three_coins() {
        let mut planner = SplitPlanner::new();
        let split = planner.plan_coins(&[2, 0, 1]).unwrap();
        assert_eq!(split.left_group, vec![0]);
        assert_eq!(split.worst_case_steps, 1);
    }

    #[test]
    fn test_memo_hit_on_reordered_input() {
        let mut planner = SplitPlanner::new();
        let a = planner.plan_coins(&[7, 3, 5, 1]).unwrap();
        let b = planner.plan_coins(&[1, 5, 3, 7]).unwrap();
        assert_eq!(a, b);
        assert_eq!(planner.len(), 1);
        assert_eq!(planner.hits(), 1);
    }

    #[test]
    fn test_clear_resets_cache() {
        let mut planner = SplitPlanner::new();
        planner.plan(&CandidateSet::full(6)).unwrap();
        planner.plan(&CandidateSet::full(4)).unwrap();
        assert_eq!(planner.len(), 2);
        planner.clear();
        assert!(planner.is_empty());
        assert_eq!(planner.hits(), 0);
    }

    #[test]
    fn test_optimal_weighings() {
        assert_eq!(optimal_weighings(1), 0);
        assert_eq!(optimal_weighings(8), 3);
        assert_eq!(optimal_weighings(12), 4);
    }
}
