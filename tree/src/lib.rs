//! Balance Tree - Decision tree reconstruction
//!
//! This crate turns a move history into the state-space tree shown by the
//! analysis view: every outcome that could have happened at each weighing,
//! with the branch that did happen marked as the true path and expanded.

pub mod analysis;
pub mod builder;
pub mod node;

pub use analysis::{analyze, try_analyze, AnalysisError, AnalysisMode, AnalysisOptions};
pub use builder::{build_from_history, DecisionTreeBuilder};
pub use node::{DecisionEdge, DecisionNode, DecisionTree, NodeId, NodeKind};

use balance_engine::{CoinIndex, EngineResult};

/// Build the decision tree for the optimal trace of one fake-coin hypothesis.
pub fn build_decision_tree(total_coins: u32, fake_coin: CoinIndex) -> EngineResult<DecisionTree> {
    DecisionTreeBuilder::new().build(total_coins, fake_coin)
}
