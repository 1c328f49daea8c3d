//! Subcommand implementations

use anyhow::{bail, Context, Result};
use balance_engine::advice::{explain, Explanation};
use balance_engine::session::{GameSession, GuessOutcome};
use balance_engine::simulator::validate_coin_count;
use balance_engine::sweep::{benchmark_throughput, sweep_hypotheses};
use balance_engine::{history, simulate_optimal_play, CandidateSet, CoinIndex, Split, SplitPlanner};
use balance_tree::{analyze as analyze_history, build_decision_tree, AnalysisMode, AnalysisOptions};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::config::Config;
use crate::render;
use crate::{AnalyzeArgs, BenchArgs, GameArgs, PlanArgs, PlayArgs, SweepArgs};

/// Convert a 1-based coin number from the command line into an index.
fn to_index(label: u32) -> Result<CoinIndex> {
    if label == 0 {
        bail!("coins are numbered from 1");
    }
    Ok(label - 1)
}

fn parse_pan(text: Option<&str>) -> Result<Vec<CoinIndex>> {
    let text = text.context("expected a comma separated list of coins")?;
    text.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            let label: u32 = s
                .trim()
                .parse()
                .with_context(|| format!("not a coin number: {s:?}"))?;
            to_index(label)
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct PlanReport<'a> {
    candidates: &'a CandidateSet,
    split: &'a Split,
    right_group: &'a [CoinIndex],
    leftover: &'a [CoinIndex],
    explanation: &'a Explanation,
    subproblems_solved: usize,
}

pub fn plan(args: PlanArgs, json: bool) -> Result<()> {
    let candidates = match args.total {
        Some(total) => {
            validate_coin_count(total)?;
            CandidateSet::full(total)
        }
        None => args
            .coins
            .iter()
            .map(|&label| to_index(label))
            .collect::<Result<CandidateSet>>()?,
    };

    let mut planner = SplitPlanner::new();
    let split = planner.plan(&candidates)?;
    let partition = split.partition(&candidates);
    let explanation = explain(&candidates, &split);

    if json {
        print_json(&PlanReport {
            candidates: &candidates,
            split: &split,
            right_group: &partition.right,
            leftover: &partition.leftover,
            explanation: &explanation,
            subproblems_solved: planner.len(),
        })
    } else {
        render::plan(&candidates, &split, &partition, &explanation);
        Ok(())
    }
}

pub fn simulate(args: GameArgs, json: bool) -> Result<()> {
    let history = simulate_optimal_play(args.total, to_index(args.fake)?)?;
    if let Some(path) = &args.save {
        history::save(&history, path)
            .with_context(|| format!("failed to save history to {}", path.display()))?;
        info!(path = %path.display(), "saved move history");
    }
    if json {
        print_json(&history)
    } else {
        render::history(&history);
        Ok(())
    }
}

pub fn tree(args: GameArgs, json: bool) -> Result<()> {
    let fake = to_index(args.fake)?;
    let tree = build_decision_tree(args.total, fake)?;
    if let Some(path) = &args.save {
        let history = simulate_optimal_play(args.total, fake)?;
        history::save(&history, path)
            .with_context(|| format!("failed to save history to {}", path.display()))?;
    }
    if json {
        print_json(&tree)
    } else {
        render::tree(&tree);
        Ok(())
    }
}

pub fn analyze(args: AnalyzeArgs, config: &Config, json: bool) -> Result<()> {
    let path = args.path.unwrap_or_else(|| config.history_path.clone());
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read history from {}", path.display()))?;

    let options = AnalysisOptions {
        mode: if args.recorded {
            AnalysisMode::Recorded
        } else {
            AnalysisMode::Optimal
        },
        hypothesis: args.hypothesis.map(to_index).transpose()?,
    };
    let tree = analyze_history(&contents, &options);

    if json {
        print_json(&tree)
    } else if tree.is_empty() {
        println!("No analysis available for {}", path.display());
        Ok(())
    } else {
        render::tree(&tree);
        Ok(())
    }
}

/// Draw a fake coin from a seeded LCG.
fn draw_fake(total: u32, seed: Option<u64>) -> CoinIndex {
    if total == 0 {
        return 0;
    }
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    let state = seed
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407);
    ((state >> 33) % total as u64) as CoinIndex
}

const PLAY_HELP: &str = "Commands: weigh <left> <right> (e.g. weigh 1,2 3,4) | guess <coin> | hint | advice | status | quit";

pub fn play(args: PlayArgs, config: &Config, json: bool) -> Result<()> {
    let fake = match args.fake {
        Some(label) => to_index(label)?,
        None => draw_fake(args.total, args.seed),
    };
    let mut session = GameSession::new(args.total, fake, config.session.clone())?;

    println!(
        "{} coins, one of them lighter. Optimal: {} weighings. {} hints available.",
        args.total,
        session.optimal_weighings(),
        session.hints_left()
    );
    println!("{PLAY_HELP}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        match words.next() {
            Some("weigh") => {
                let pans = parse_pan(words.next()).and_then(|l| Ok((l, parse_pan(words.next())?)));
                match pans {
                    Ok((left, right)) => match session.weigh(&left, &right) {
                        Ok(w) => {
                            println!("{}", w.outcome.display_text());
                            history::save(session.history(), &config.history_path)?;
                        }
                        Err(err) => println!("{err}"),
                    },
                    Err(err) => println!("{err:#}"),
                }
            }
            Some("guess") => {
                let coin = words
                    .next()
                    .context("expected a coin number")
                    .and_then(|s| s.parse::<u32>().context("not a coin number"))
                    .and_then(to_index);
                match coin.map(|c| session.guess(c)) {
                    Ok(Ok(GuessOutcome::Correct)) => println!("Correct! You found the fake coin."),
                    Ok(Ok(GuessOutcome::Wrong)) => println!("Wrong guess! Try again."),
                    Ok(Err(err)) => println!("{err}"),
                    Err(err) => println!("{err:#}"),
                }
            }
            Some("hint") => match session.hint() {
                Ok(hint) => {
                    println!("{}", hint.summary());
                    println!(
                        "  left: {}  right: {}  aside: {}",
                        render::labels(&hint.left_pan),
                        render::labels(&hint.right_pan),
                        render::labels(&hint.leftover)
                    );
                    println!("  {} hints left", session.hints_left());
                }
                Err(err) => println!("{err}"),
            },
            Some("advice") => match session.recommendation() {
                Ok((split, explanation)) => {
                    let candidates = session.candidates().clone();
                    render::plan(&candidates, &split, &split.partition(&candidates), &explanation);
                    println!("Subproblems solved: {}", session.subproblems_solved());
                }
                Err(err) => println!("{err}"),
            },
            Some("status") => {
                println!(
                    "Candidates: {} | attempts: {} | eliminated: {} | information gained: {:.2} bits",
                    session.candidates(),
                    session.attempts(),
                    session.eliminated(),
                    session.information_gained_bits()
                );
            }
            Some("quit") | Some("exit") => break,
            Some(other) => println!("Unknown command {other:?}. {PLAY_HELP}"),
            None => {}
        }
        stdout.flush()?;

        if session.is_over() {
            break;
        }
    }

    if let Some(rating) = session.rating() {
        history::save(session.history(), &config.history_path)?;
        println!("{rating} {} attempts.", session.attempts());
    }
    if json {
        print_json(session.history())?;
    }
    Ok(())
}

pub fn sweep(args: SweepArgs, json: bool) -> Result<()> {
    let summary = sweep_hypotheses(args.total)?;
    if json {
        print_json(&summary)
    } else {
        render::sweep(&summary);
        Ok(())
    }
}

pub fn bench(args: BenchArgs) -> Result<()> {
    println!("Running simulation benchmark...");
    println!("Coins: {}  Rounds: {}", args.total, args.rounds);
    let (sims_per_sec, duration_ms) = benchmark_throughput(args.total, args.rounds)?;

    println!("Results:");
    println!("  Duration: {} ms", duration_ms);
    println!("  Throughput: {:.2} simulations/sec", sims_per_sec);
    Ok(())
}
