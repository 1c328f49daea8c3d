//! Balance CLI - Command-line interface for the fake-coin strategy engine
//!
//! Coins are numbered from 1 on the command line, the way players see them.
//! JSON output carries the engine's 0-based indices.

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(name = "balance", version, about = "Find the lighter fake coin with a balance scale")]
pub struct Cli {
    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./balance.yaml when present)
    #[arg(long, global = true, env = "BALANCE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend the next weighing for a set of candidate coins
    Plan(PlanArgs),
    /// Print the optimal sequence of weighings for a known fake coin
    Simulate(GameArgs),
    /// Print the decision tree for a known fake coin
    Tree(GameArgs),
    /// Analyze a saved move history
    Analyze(AnalyzeArgs),
    /// Play a game on stdin
    Play(PlayArgs),
    /// Simulate every possible fake coin and summarize the weighings needed
    Sweep(SweepArgs),
    /// Measure simulation throughput
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Candidate coins, comma separated (e.g. 1,2,5,7)
    #[arg(long, value_delimiter = ',', conflicts_with = "total", required_unless_present = "total")]
    pub coins: Vec<u32>,

    /// Plan for a fresh game of this many coins
    #[arg(long)]
    pub total: Option<u32>,
}

#[derive(Args, Debug)]
pub struct GameArgs {
    /// Number of coins on the table
    #[arg(long)]
    pub total: u32,

    /// The lighter coin
    #[arg(long)]
    pub fake: u32,

    /// Also write the move history to this file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// History file (defaults to the configured history path)
    pub path: Option<PathBuf>,

    /// Replay the recorded weighings instead of the optimal ones
    #[arg(long)]
    pub recorded: bool,

    /// Analyze as if this coin were the fake one
    #[arg(long, conflicts_with = "recorded")]
    pub hypothesis: Option<u32>,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Number of coins on the table
    #[arg(long, default_value_t = 8)]
    pub total: u32,

    /// Fix the fake coin instead of drawing it
    #[arg(long)]
    pub fake: Option<u32>,

    /// Seed for drawing the fake coin
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Number of coins on the table
    #[arg(long)]
    pub total: u32,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Number of coins on the table
    #[arg(long, default_value_t = 1_024)]
    pub total: u32,

    /// Simulations to time
    #[arg(long, default_value_t = 100_000)]
    pub rounds: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::load(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Plan(args) => commands::plan(args, cli.json),
        Commands::Simulate(args) => commands::simulate(args, cli.json),
        Commands::Tree(args) => commands::tree(args, cli.json),
        Commands::Analyze(args) => commands::analyze(args, &config, cli.json),
        Commands::Play(args) => commands::play(args, &config, cli.json),
        Commands::Sweep(args) => commands::sweep(args, cli.json),
        Commands::Bench(args) => commands::bench(args),
    }
}
