//! Advisory text for the hint and analysis overlays
//!
//! Everything here is derived from a [`Split`]; nothing feeds back into
//! planning.

use crate::candidates::{CandidateSet, CoinIndex};
use crate::planner::{optimal_weighings, Split};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable explanation of the planner's recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    pub strategy: String,
    pub complexity: String,
}

/// Explain `split` for the candidate set it was planned for.
pub fn explain(candidates: &CandidateSet, split: &Split) -> Explanation {
    if candidates.len() <= 1 || split.is_solved() {
        return Explanation {
            text: "You can now make your final guess!".to_string(),
            strategy: "Direct comparison".to_string(),
            complexity: "O(1)".to_string(),
        };
    }

    let partition = split.partition(candidates);
    if candidates.len() == 2 {
        return Explanation {
            text: format!(
                "Compare coins {} and {} to determine which one is fake.",
                partition.left[0] + 1,
                partition.right[0] + 1
            ),
            strategy: "Binary comparison".to_string(),
            complexity: "O(1)".to_string(),
        };
    }

    Explanation {
        text: format!(
            "Based on DP analysis, comparing {} coins on each side will maximize information gain ({:.2} bits) and guarantee finding the fake coin in at most {} steps.",
            partition.left.len(),
            split.information_gain_bits,
            split.worst_case_steps
        ),
        strategy: "Divide and Conquer with DP optimization".to_string(),
        complexity: format!("O(log {})", candidates.len()),
    }
}

/// A hint handed to the player during live play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    pub left_pan: Vec<CoinIndex>,
    pub right_pan: Vec<CoinIndex>,
    pub leftover: Vec<CoinIndex>,
    pub worst_case_steps: u32,
    pub information_gain_bits: f64,
    pub explanation: Explanation,
}

impl Hint {
    /// Build a hint from a non-trivial split of `candidates`.
    pub fn new(candidates: &CandidateSet, split: &Split) -> Self {
        let partition = split.partition(candidates);
        Hint {
            explanation: explain(candidates, split),
            left_pan: partition.left,
            right_pan: partition.right,
            leftover: partition.leftover,
            worst_case_steps: split.worst_case_steps,
            information_gain_bits: split.information_gain_bits,
        }
    }

    /// One-line summary for compact displays.
    pub fn summary(&self) -> String {
        if self.leftover.is_empty() {
            format!(
                "Hint: try weighing {} coins against {}",
                self.left_pan.len(),
                self.right_pan.len()
            )
        } else {
            format!(
                "Hint: try weighing {} coins against {} and keep {} aside",
                self.left_pan.len(),
                self.right_pan.len(),
                self.leftover.len()
            )
        }
    }
}

/// End-of-game performance band relative to `ceil(log2 N)` weighings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    Perfect,
    Excellent,
    Great,
    Good,
}

impl Rating {
    pub fn for_attempts(total_coins: u32, attempts: u32) -> Rating {
        let optimal = optimal_weighings(total_coins);
        if attempts <= optimal {
            Rating::Perfect
        } else if attempts <= optimal + 1 {
            Rating::Excellent
        } else if attempts <= optimal + 2 {
            Rating::Great
        } else {
            Rating::Good
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Perfect => "Perfect!",
            Rating::Excellent => "Excellent!",
            Rating::Great => "Great!",
            Rating::Good => "Good Job!",
        };
        f.write_str(label)
    }
}
