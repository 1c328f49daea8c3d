//! Plain-text rendering for terminal output
//!
//! Coin numbers are shown 1-based.

use balance_engine::advice::Explanation;
use balance_engine::sweep::SweepSummary;
use balance_engine::{CandidateSet, CoinIndex, MoveHistory, Partition, Split};
use balance_tree::{DecisionTree, NodeId};

pub fn labels(coins: &[CoinIndex]) -> String {
    if coins.is_empty() {
        return "-".to_string();
    }
    coins
        .iter()
        .map(|c| (c + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn plan(candidates: &CandidateSet, split: &Split, partition: &Partition, explanation: &Explanation) {
    println!("Candidates: {} ({} coins)", candidates, candidates.len());
    if split.is_solved() {
        println!("{}", explanation.text);
        return;
    }
    println!("Left pan:   {}", labels(&partition.left));
    println!("Right pan:  {}", labels(&partition.right));
    println!("Set aside:  {}", labels(&partition.leftover));
    println!("Worst case: {} weighings", split.worst_case_steps);
    println!("Gain:       {:.2} bits", split.information_gain_bits);
    println!("Strategy:   {} [{}]", explanation.strategy, explanation.complexity);
    println!("{}", explanation.text);
}

pub fn history(history: &MoveHistory) {
    println!(
        "{} coins, fake coin {}: {} weighings",
        history.total_coins,
        history.fake_coin + 1,
        history.len()
    );
    for w in &history.moves {
        println!(
            "  {}. [{}] vs [{}] -> {}; remaining {}",
            w.step,
            labels(&w.left_pan),
            labels(&w.right_pan),
            w.outcome.display_text(),
            w.remaining
        );
    }
    match history.final_guess {
        Some(guess) => println!("Final guess: coin {}", guess + 1),
        None => println!("No final guess yet"),
    }
}

pub fn tree(tree: &DecisionTree) {
    if let Some(root) = tree.root() {
        print_subtree(tree, root.id, 0);
    }
}

fn print_subtree(tree: &DecisionTree, id: NodeId, depth: usize) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let marker = if node.is_true_path { '*' } else { ' ' };
    let highlight = if node.highlighted { "  <- fake coin" } else { "" };
    println!("{}{} {}{}", "  ".repeat(depth), marker, node.label(), highlight);
    let children: Vec<NodeId> = tree.children(id).map(|c| c.id).collect();
    for child in children {
        print_subtree(tree, child, depth + 1);
    }
}

pub fn sweep(summary: &SweepSummary) {
    println!("{} coins, one simulation per possible fake coin", summary.total_coins);
    println!("  Fewest weighings: {}", summary.min_steps);
    println!("  Most weighings:   {}", summary.max_steps);
    println!("  Mean weighings:   {:.2}", summary.mean_steps);
    println!("  ceil(log2 N):     {}", summary.optimal_bound);
    println!("  Over the bound:   {}", summary.over_bound);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_one_based() {
        assert_eq!(labels(&[0, 4]), "1, 5");
        assert_eq!(labels(&[]), "-");
    }
}
