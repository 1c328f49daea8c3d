//! Best-effort analysis of persisted move histories
//!
//! Analysis is a convenience view, not a critical path: a history that cannot
//! be read yields an empty tree and a warning instead of an error.

use crate::builder::{build_from_history, DecisionTreeBuilder};
use crate::node::DecisionTree;
use balance_engine::{history, CoinIndex, MoveHistory};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Which trace the analysis tree shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// Regenerate the optimal trace for the game's fake coin
    #[default]
    Optimal,
    /// Replay the player's own weighings and guess
    Recorded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub mode: AnalysisMode,
    /// Analyze as if this coin were the fake one (optimal mode only)
    pub hypothesis: Option<CoinIndex>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no analysis available: {0}")]
    NoAnalysisAvailable(String),
}

/// Analyze an in-memory history.
pub fn try_analyze_history(
    history: &MoveHistory,
    options: &AnalysisOptions,
) -> Result<DecisionTree, AnalysisError> {
    let tree = match options.mode {
        AnalysisMode::Optimal => {
            let fake = options.hypothesis.unwrap_or(history.fake_coin);
            DecisionTreeBuilder::new().build(history.total_coins, fake)
        }
        AnalysisMode::Recorded => {
            if options.hypothesis.is_some() {
                warn!("hypothesis is ignored when replaying a recorded game");
            }
            build_from_history(history)
        }
    };
    tree.map_err(|err| AnalysisError::NoAnalysisAvailable(err.to_string()))
}

/// Analyze a persisted history. A record without a coin count is an empty tree.
pub fn try_analyze(json: &str, options: &AnalysisOptions) -> Result<DecisionTree, AnalysisError> {
    match history::decode(json) {
        Ok(Some(history)) => try_analyze_history(&history, options),
        Ok(None) => Ok(DecisionTree::default()),
        Err(err) => Err(AnalysisError::NoAnalysisAvailable(err.to_string())),
    }
}

/// Like [`try_analyze`], but degrades to an empty tree on failure.
pub fn analyze(json: &str, options: &AnalysisOptions) -> DecisionTree {
    try_analyze(json, options).unwrap_or_else(|err| {
        warn!(%err, "analysis skipped");
        DecisionTree::default()
    })
}
