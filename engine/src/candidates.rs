//! Candidate-set utilities
//!
//! A [`CandidateSet`] is the set of coins that could still be the fake one.
//! It is always kept sorted and de-duplicated, which makes it its own
//! canonical form: two sets built from the same coins in any order compare
//! equal and produce the same memo key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a coin on the table, `0..total_coins`.
pub type CoinIndex = u32;

/// Sorted, de-duplicated set of coin indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<CoinIndex>", into = "Vec<CoinIndex>")]
pub struct CandidateSet(Vec<CoinIndex>);

impl CandidateSet {
    /// Canonicalize an arbitrary list of coins.
    pub fn new(mut coins: Vec<CoinIndex>) -> Self {
        coins.sort_unstable();
        coins.dedup();
        CandidateSet(coins)
    }

    /// Every coin of a fresh game: `{0, .., total - 1}`.
    pub fn full(total: u32) -> Self {
        CandidateSet((0..total).collect())
    }

    /// The set holding a single coin.
    pub fn single(coin: CoinIndex) -> Self {
        CandidateSet(vec![coin])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, coin: CoinIndex) -> bool {
        self.0.binary_search(&coin).is_ok()
    }

    /// Coins in ascending order.
    pub fn as_slice(&self) -> &[CoinIndex] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = CoinIndex> + '_ {
        self.0.iter().copied()
    }

    /// The only remaining coin, if exactly one is left.
    pub fn sole(&self) -> Option<CoinIndex> {
        match self.0.as_slice() {
            [coin] => Some(*coin),
            _ => None,
        }
    }

    /// Memoization key: the ascending elements joined by `,`.
    ///
    /// Built from the actual indices, never just the size, so two games that
    /// reach different sets of equal size never share a memo entry.
    pub fn key(&self) -> String {
        self.0
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Coins in `self` that are also in `other`.
    pub fn intersection(&self, other: &[CoinIndex]) -> CandidateSet {
        CandidateSet(self.iter().filter(|c| other.contains(c)).collect())
    }

    /// Coins in `self` that appear in none of `excluded`.
    pub fn difference(&self, excluded: &[&[CoinIndex]]) -> CandidateSet {
        CandidateSet(
            self.iter()
                .filter(|c| !excluded.iter().any(|group| group.contains(c)))
                .collect(),
        )
    }

    /// Split into two equal pans of `group_size` coins, taken in ascending
    /// order, and the unweighed remainder.
    pub fn partition(&self, group_size: usize) -> Partition {
        let group_size = group_size.min(self.len() / 2);
        Partition {
            left: self.0[..group_size].to_vec(),
            right: self.0[group_size..2 * group_size].to_vec(),
            leftover: self.0[2 * group_size..].to_vec(),
        }
    }
}

impl From<Vec<CoinIndex>> for CandidateSet {
    fn from(coins: Vec<CoinIndex>) -> Self {
        CandidateSet::new(coins)
    }
}

impl From<CandidateSet> for Vec<CoinIndex> {
    fn from(set: CandidateSet) -> Self {
        set.0
    }
}

impl FromIterator<CoinIndex> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = CoinIndex>>(iter: I) -> Self {
        CandidateSet::new(iter.into_iter().collect())
    }
}

impl fmt::Display for CandidateSet {
    /// Coins are shown 1-based, the way players number them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.0.iter().map(|c| (c + 1).to_string()).collect();
        write!(f, "{{{}}}", labels.join(", "))
    }
}

/// Three-way grouping of a candidate set for one weighing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub left: Vec<CoinIndex>,
    pub right: Vec<CoinIndex>,
    /// Candidates kept off the scale this round.
    pub leftover: Vec<CoinIndex>,
}
