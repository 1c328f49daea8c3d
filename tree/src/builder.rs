//! State-space tree reconstruction
//!
//! Walks a move history from the full candidate set. At every weighing it
//! materializes each outcome that can actually happen (`Balanced` only when
//! some candidate was left off the scale), marks the recorded one as the true
//! path, and descends into that branch alone. Siblings stay leaves, so the
//! tree has at most three nodes per weighing plus the root and final guess.

use crate::node::{DecisionTree, NodeKind};
use balance_engine::simulator::validate_game;
use balance_engine::{CandidateSet, CoinIndex, EngineResult, MoveHistory, Outcome, WeighingSimulator};
use tracing::{debug, warn};

/// Builds decision trees, reusing one simulator (and its planner cache).
#[derive(Debug, Default)]
pub struct DecisionTreeBuilder {
    simulator: WeighingSimulator,
}

impl DecisionTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree for the optimal trace with `fake_coin` as ground truth.
    pub fn build(&mut self, total_coins: u32, fake_coin: CoinIndex) -> EngineResult<DecisionTree> {
        let history = self.simulator.simulate(total_coins, fake_coin)?;
        build_from_history(&history)
    }
}

/// Outcomes that can occur for one weighing, in sibling order, with the
/// candidates each leaves. An outcome that would leave no candidate is dropped.
fn applicable_outcomes(
    entry: &CandidateSet,
    left: &[CoinIndex],
    right: &[CoinIndex],
) -> Vec<(Outcome, CandidateSet)> {
    Outcome::ALL
        .into_iter()
        .map(|outcome| (outcome, outcome.narrow(entry, left, right)))
        .filter(|(_, candidates)| !candidates.is_empty())
        .collect()
}

/// Replay a recorded history, optimal or player-made.
///
/// Nodes are numbered by their position in the history (the first weighing is
/// step 1, the final guess follows the last weighing), whatever `step` values
/// the record carries.
///
/// A recorded outcome that cannot occur from the replayed state (for example
/// `Balanced` when every candidate was on the scale) ends the true path
/// there; the rest of the history is ignored.
pub fn build_from_history(history: &MoveHistory) -> EngineResult<DecisionTree> {
    validate_game(history.total_coins, history.fake_coin)?;
    let fake = history.fake_coin;

    let mut tree = DecisionTree::new();
    let mut entry = CandidateSet::full(history.total_coins);
    let mut parent = tree.push_node(None, 0, 0, NodeKind::Start, entry.clone(), true, fake);
    let mut complete = true;

    for (index, weighing) in history.moves.iter().enumerate() {
        let step = index as u32 + 1;
        let (left, right) = (weighing.left_pan.as_slice(), weighing.right_pan.as_slice());
        let mut next = None;

        for (order, (outcome, candidates)) in
            applicable_outcomes(&entry, left, right).into_iter().enumerate()
        {
            let on_path = outcome == weighing.outcome;
            let kind = NodeKind::Branch {
                outcome,
                left_pan_size: left.len(),
            };
            let id = tree.push_node(
                Some(parent),
                step,
                order as u32,
                kind,
                candidates.clone(),
                on_path,
                fake,
            );
            if on_path {
                next = Some((id, candidates));
            }
        }

        match next {
            Some((id, candidates)) => {
                parent = id;
                entry = candidates;
            }
            None => {
                warn!(
                    step,
                    outcome = %weighing.outcome,
                    "recorded outcome cannot occur from the replayed state; truncating"
                );
                complete = false;
                break;
            }
        }
    }

    if let (true, Some(guess)) = (complete, history.final_guess) {
        tree.push_node(
            Some(parent),
            history.moves.len() as u32 + 1,
            0,
            NodeKind::FinalGuess {
                guess,
                correct: guess == fake,
            },
            CandidateSet::single(guess),
            true,
            fake,
        );
    }

    debug!(nodes = tree.len(), weighings = history.len(), "built decision tree");
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use balance_engine::Weighing;

    #[test]
    fn test_eight_coins_shape() {
        let tree = DecisionTreeBuilder::new().build(8, 3).unwrap();
        // root + 2 per weighing + final guess
        assert_eq!(tree.len(), 1 + 2 * 3 + 1);
        assert_eq!(tree.edges.len(), tree.len() - 1);
        assert_eq!(tree.true_path().len(), 5);
        let guess = tree.final_guess().unwrap();
        assert_eq!(guess.kind, NodeKind::FinalGuess { guess: 3, correct: true });
        assert_eq!(guess.step, 4);
    }

    #[test]
    fn test_only_true_path_is_expanded() {
        let tree = DecisionTreeBuilder::new().build(16, 9).unwrap();
        for node in &tree.nodes {
            let has_children = tree.children(node.id).next().is_some();
            if has_children {
                assert!(node.is_true_path);
            }
        }
    }

    #[test]
    fn test_sibling_order_is_outcome_order() {
        let tree = DecisionTreeBuilder::new().build(9, 0).unwrap();
        let first: Vec<(u32, Option<Outcome>)> = tree
            .children(0)
            .map(|n| match n.kind {
                NodeKind::Branch { outcome, .. } => (n.order, Some(outcome)),
                _ => (n.order, None),
            })
            .collect();
        assert_eq!(
            first,
            vec![
                (0, Some(Outcome::LeftLighter)),
                (1, Some(Outcome::RightLighter)),
                (2, Some(Outcome::Balanced)),
            ]
        );
    }

    #[test]
    fn test_unfinished_history_has_no_guess_node() {
        let mut history = balance_engine::simulate_optimal_play(4, 2).unwrap();
        history.final_guess = None;
        let tree = build_from_history(&history).unwrap();
        assert!(tree.final_guess().is_none());
        assert!(tree.nodes.iter().all(|n| !n.is_terminal));
    }

    #[test]
    fn test_wrong_recorded_guess_is_not_highlighted() {
        let mut history = balance_engine::simulate_optimal_play(4, 2).unwrap();
        history.final_guess = Some(0);
        let tree = build_from_history(&history).unwrap();
        let guess = tree.final_guess().unwrap();
        assert_eq!(guess.kind, NodeKind::FinalGuess { guess: 0, correct: false });
        assert!(!guess.highlighted);
    }

    #[test]
    fn test_impossible_recorded_outcome_truncates() {
        let history = MoveHistory {
            moves: vec![Weighing {
                step: 1,
                left_pan: vec![0],
                right_pan: vec![1],
                outcome: Outcome::Balanced,
                remaining: CandidateSet::default(),
            }],
            fake_coin: 0,
            total_coins: 2,
            final_guess: Some(0),
        };
        let tree = build_from_history(&history).unwrap();
        assert_eq!(tree.len(), 3);
        assert!(tree.final_guess().is_none());
        assert_eq!(tree.true_path().len(), 1);
    }

    #[test]
    fn test_ruled_out_pans_leave_only_possible_outcomes() {
        // 6 coins, fake 2: {0,1} vs {2,3} leaves {2,3}; then {0} vs {1} can only balance
        let mut session = balance_engine::session::GameSession::new(
            6,
            2,
            balance_engine::session::SessionConfig::default(),
        )
        .unwrap();
        session.weigh(&[0, 1], &[2, 3]).unwrap();
        session.weigh(&[0], &[1]).unwrap();
        let tree = build_from_history(session.history()).unwrap();

        assert!(tree.nodes.iter().all(|n| !n.candidates.is_empty()));
        let second = tree.true_path()[1].id;
        let outcomes: Vec<NodeKind> = tree.children(second).map(|n| n.kind).collect();
        assert_eq!(
            outcomes,
            vec![NodeKind::Branch {
                outcome: Outcome::Balanced,
                left_pan_size: 1
            }]
        );
        assert_eq!(tree.children(second).next().unwrap().order, 0);
    }

    #[test]
    fn test_dropped_recorded_outcome_truncates() {
        // right pan holds only ruled-out coins, yet the record claims it was lighter
        let history = MoveHistory {
            moves: vec![
                Weighing {
                    step: 1,
                    left_pan: vec![0, 1],
                    right_pan: vec![2, 3],
                    outcome: Outcome::LeftLighter,
                    remaining: CandidateSet::new(vec![0, 1]),
                },
                Weighing {
                    step: 2,
                    left_pan: vec![0],
                    right_pan: vec![2],
                    outcome: Outcome::RightLighter,
                    remaining: CandidateSet::default(),
                },
            ],
            fake_coin: 0,
            total_coins: 4,
            final_guess: Some(0),
        };
        let tree = build_from_history(&history).unwrap();
        assert!(tree.final_guess().is_none());
        assert!(tree.nodes.iter().all(|n| !n.candidates.is_empty()));
        assert_eq!(tree.true_path().len(), 2);
    }

    #[test]
    fn test_steps_follow_history_position() {
        let mut history = balance_engine::simulate_optimal_play(8, 6).unwrap();
        for (i, w) in history.moves.iter_mut().enumerate() {
            w.step = 10 * (i as u32 + 1);
        }
        let tree = build_from_history(&history).unwrap();
        let steps: Vec<u32> = tree.true_path().iter().map(|n| n.step).collect();
        let expected: Vec<u32> = (0..=history.moves.len() as u32 + 1).collect();
        assert_eq!(steps, expected);
    }

    #[test]
    fn test_player_history_replay() {
        // 6 coins, fake 4: weigh {0,1} vs {2,3} (balanced), then {4} vs {5}
        let mut session = balance_engine::session::GameSession::new(
            6,
            4,
            balance_engine::session::SessionConfig::default(),
        )
        .unwrap();
        session.weigh(&[0, 1], &[2, 3]).unwrap();
        session.weigh(&[4], &[5]).unwrap();
        session.guess(4).unwrap();
        let tree = build_from_history(session.history()).unwrap();

        let path: Vec<usize> = tree.true_path().iter().map(|n| n.candidates.len()).collect();
        assert_eq!(path, vec![6, 2, 1, 1]);
        // first weighing leaves {4, 5} aside, so a balanced branch exists
        assert_eq!(tree.children(0).count(), 3);
        // second weighing covers both candidates
        assert_eq!(tree.children(tree.true_path()[1].id).count(), 2);
    }
}
