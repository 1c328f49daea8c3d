//! Node definitions for the decision tree
//!
//! Nodes and edges live in flat vectors indexed by [`NodeId`], the same way
//! for every tree: the root is node 0 and every child is pushed after its
//! parent. Trees are rebuilt per analysis request and never persisted.

use balance_engine::{CandidateSet, CoinIndex, Outcome};
use serde::Serialize;

/// Node ID type (index into flat array storage)
pub type NodeId = u32;

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    /// Every coin is still a candidate
    Start,
    /// State after one outcome of a weighing
    Branch {
        outcome: Outcome,
        left_pan_size: usize,
    },
    /// The player's final guess
    FinalGuess { guess: CoinIndex, correct: bool },
}

/// A state in the decision tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionNode {
    pub id: NodeId,
    /// Parent node ID (None for root)
    pub parent: Option<NodeId>,
    /// 0 for the root, then the 1-based weighing step that produced the node
    pub step: u32,
    /// Position among siblings, left to right
    pub order: u32,
    pub kind: NodeKind,
    /// Candidates at entry to the next step
    pub candidates: CandidateSet,
    pub is_terminal: bool,
    pub is_true_path: bool,
    /// The fake coin is among `candidates`. Informational only: siblings
    /// off the true path can be highlighted too.
    pub highlighted: bool,
}

impl DecisionNode {
    /// Short label for text renderers. Coins are numbered from 1.
    pub fn label(&self) -> String {
        match self.kind {
            NodeKind::Start => format!("Start: coins {}", self.candidates),
            NodeKind::Branch { outcome, .. } => {
                format!("Step {} ({}): remaining {}", self.step, outcome, self.candidates)
            }
            NodeKind::FinalGuess { guess, correct } => format!(
                "Final guess: coin {}{}",
                guess + 1,
                if correct { " (correct)" } else { " (wrong)" }
            ),
        }
    }
}

/// Parent-to-child link tagged with the outcome that leads to the child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// `None` on the edge into the final-guess node
    pub outcome: Option<Outcome>,
    pub is_true_path: bool,
}

/// Decision tree wrapper
///
/// Contains flat arrays of nodes and edges for straightforward rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecisionTree {
    /// Flat array of nodes indexed by NodeId
    pub nodes: Vec<DecisionNode>,
    pub edges: Vec<DecisionEdge>,
}

impl DecisionTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&DecisionNode> {
        self.nodes.get(id as usize)
    }

    pub fn root(&self) -> Option<&DecisionNode> {
        self.nodes.first()
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id` in sibling order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &DecisionNode> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.from == id)
            .filter_map(move |e| self.get(e.to))
    }

    /// Nodes on the true path, root first.
    pub fn true_path(&self) -> Vec<&DecisionNode> {
        self.nodes.iter().filter(|n| n.is_true_path).collect()
    }

    /// The final-guess node, if the history had one.
    pub fn final_guess(&self) -> Option<&DecisionNode> {
        self.nodes
            .iter()
            .find(|n| matches!(n.kind, NodeKind::FinalGuess { .. }))
    }

    pub(crate) fn push_node(
        &mut self,
        parent: Option<NodeId>,
        step: u32,
        order: u32,
        kind: NodeKind,
        candidates: CandidateSet,
        is_true_path: bool,
        fake_coin: CoinIndex,
    ) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(DecisionNode {
            id,
            parent,
            step,
            order,
            kind,
            highlighted: candidates.contains(fake_coin),
            is_terminal: matches!(kind, NodeKind::FinalGuess { .. }),
            candidates,
            is_true_path,
        });
        if let Some(from) = parent {
            let outcome = match kind {
                NodeKind::Branch { outcome, .. } => Some(outcome),
                _ => None,
            };
            self.edges.push(DecisionEdge {
                from,
                to: id,
                outcome,
                is_true_path,
            });
        }
        id
    }
}
