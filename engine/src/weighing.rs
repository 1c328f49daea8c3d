//! Weighing records
//!
//! This module defines the immutable records produced by play: the three
//! possible outcomes of a weighing, a single recorded [`Weighing`], and the
//! chronological [`MoveHistory`] consumed by the tree reconstructor.

use crate::candidates::{CandidateSet, CoinIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of comparing two pans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    /// The fake coin is on the left pan
    LeftLighter,
    /// The fake coin is on the right pan
    RightLighter,
    /// The fake coin is in neither pan
    Balanced,
}

impl Outcome {
    /// All outcomes in branch order.
    pub const ALL: [Outcome; 3] = [Outcome::LeftLighter, Outcome::RightLighter, Outcome::Balanced];

    /// Outcome of weighing `left` against `right` when `fake` is the light coin.
    pub fn observe(left: &[CoinIndex], right: &[CoinIndex], fake: CoinIndex) -> Outcome {
        if left.contains(&fake) {
            Outcome::LeftLighter
        } else if right.contains(&fake) {
            Outcome::RightLighter
        } else {
            Outcome::Balanced
        }
    }

    /// Candidates still possible after this outcome, given the set at entry.
    pub fn narrow(
        self,
        entry: &CandidateSet,
        left: &[CoinIndex],
        right: &[CoinIndex],
    ) -> CandidateSet {
        match self {
            Outcome::LeftLighter => entry.intersection(left),
            Outcome::RightLighter => entry.intersection(right),
            Outcome::Balanced => entry.difference(&[left, right]),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::LeftLighter => "left lighter",
            Outcome::RightLighter => "right lighter",
            Outcome::Balanced => "balanced",
        };
        f.write_str(label)
    }
}

/// One performed comparison. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weighing {
    /// 1-based position in the history
    pub step: u32,
    pub left_pan: Vec<CoinIndex>,
    pub right_pan: Vec<CoinIndex>,
    pub outcome: Outcome,
    /// Candidates still possible after this weighing
    pub remaining: CandidateSet,
}

/// Chronological record of a game, frozen once the game ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    pub moves: Vec<Weighing>,
    pub fake_coin: CoinIndex,
    pub total_coins: u32,
    /// `None` until the player has made a correct guess
    pub final_guess: Option<CoinIndex>,
}

impl MoveHistory {
    /// Empty history for a new game.
    pub fn new(total_coins: u32, fake_coin: CoinIndex) -> Self {
        MoveHistory {
            moves: Vec::new(),
            fake_coin,
            total_coins,
            final_guess: None,
        }
    }

    /// Number of weighings recorded.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The most recent weighing, if any.
    pub fn last(&self) -> Option<&Weighing> {
        self.moves.last()
    }

    /// Candidates after the last recorded weighing.
    pub fn remaining(&self) -> CandidateSet {
        self.moves
            .last()
            .map(|w| w.remaining.clone())
            .unwrap_or_else(|| CandidateSet::full(self.total_coins))
    }

    pub(crate) fn push(&mut self, weighing: Weighing) {
        self.moves.push(weighing);
    }
}
