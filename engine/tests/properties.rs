//! Property-based tests for the planner and simulator
//!
//! 1. Determinism: same game → same history
//! 2. Coverage: pans are disjoint and, with the leftover, cover the entry set
//! 3. Progress: the candidate set strictly shrinks until one coin remains
//! 4. Idempotence: planning is insensitive to input order

use balance_engine::{
    simulate_optimal_play, CandidateSet, CoinIndex, Outcome, SplitPlanner, WeighingSimulator,
};
use proptest::prelude::*;

/// A coin count and a fake coin inside it.
fn game_strategy() -> impl Strategy<Value = (u32, CoinIndex)> {
    (1u32..200).prop_flat_map(|total| (Just(total), 0..total))
}

/// A non-empty set of distinct coins, in shuffled order.
fn shuffled_coins_strategy() -> impl Strategy<Value = Vec<CoinIndex>> {
    prop::collection::hash_set(0u32..500, 1..60)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #[test]
    fn proptest_simulation_is_deterministic((total, fake) in game_strategy()) {
        let a = simulate_optimal_play(total, fake).unwrap();
        let b = simulate_optimal_play(total, fake).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn proptest_pans_cover_entry_set((total, fake) in game_strategy()) {
        let history = simulate_optimal_play(total, fake).unwrap();
        let mut entry = CandidateSet::full(total);
        for w in &history.moves {
            prop_assert_eq!(w.left_pan.len(), w.right_pan.len());
            prop_assert!(w.left_pan.iter().all(|c| !w.right_pan.contains(c)));
            let leftover = entry.difference(&[w.left_pan.as_slice(), w.right_pan.as_slice()]);
            prop_assert!(leftover.len() <= 1);
            let mut union: Vec<CoinIndex> = w.left_pan.clone();
            union.extend(&w.right_pan);
            union.extend(leftover.iter());
            prop_assert_eq!(CandidateSet::new(union), entry.clone());
            entry = w.remaining.clone();
        }
    }

    #[test]
    fn proptest_candidates_strictly_shrink((total, fake) in game_strategy()) {
        let history = simulate_optimal_play(total, fake).unwrap();
        prop_assert!(history.len() <= total as usize);
        let mut size = total as usize;
        for w in &history.moves {
            prop_assert!(w.remaining.len() < size);
            prop_assert!(w.remaining.contains(fake));
            size = w.remaining.len();
        }
        prop_assert_eq!(size, 1);
        prop_assert_eq!(history.final_guess, Some(fake));
    }

    #[test]
    fn proptest_outcome_matches_ground_truth((total, fake) in game_strategy()) {
        let history = simulate_optimal_play(total, fake).unwrap();
        for w in &history.moves {
            let expected = if w.left_pan.contains(&fake) {
                Outcome::LeftLighter
            } else if w.right_pan.contains(&fake) {
                Outcome::RightLighter
            } else {
                Outcome::Balanced
            };
            prop_assert_eq!(w.outcome, expected);
        }
    }

    #[test]
    fn proptest_plan_ignores_input_order(coins in shuffled_coins_strategy()) {
        let mut planner = SplitPlanner::new();
        let a = planner.plan_coins(&coins).unwrap();
        let mut reversed = coins.clone();
        reversed.reverse();
        let b = planner.plan_coins(&reversed).unwrap();
        prop_assert_eq!(&a.left_group, &b.left_group);
        prop_assert_eq!(a.worst_case_steps, b.worst_case_steps);
        prop_assert_eq!(a.information_gain_bits.to_bits(), b.information_gain_bits.to_bits());

        // A fresh planner computes the same split the cache returned
        let fresh = SplitPlanner::new().plan_coins(&reversed).unwrap();
        prop_assert_eq!(fresh, b);
    }
}

#[test]
fn test_eight_coins_fake_three() {
    let history = WeighingSimulator::new().simulate(8, 3).unwrap();
    assert_eq!(history.len(), 3);
    let remaining: Vec<usize> = history.moves.iter().map(|w| w.remaining.len()).collect();
    assert_eq!(remaining, vec![4, 2, 1]);
    assert_eq!(history.final_guess, Some(3));
}

#[test]
fn test_entry_points_reject_invalid_input() {
    assert!(simulate_optimal_play(0, 0).unwrap_err().is_invalid_input());
    assert!(simulate_optimal_play(5, 7).unwrap_err().is_invalid_input());
    assert!(balance_engine::plan_split(&CandidateSet::default())
        .unwrap_err()
        .is_invalid_input());
}
