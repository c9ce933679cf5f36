//! gomoku-mcts: play Gomoku against a Monte Carlo Tree Search agent.
//!
//! ## Usage
//!
//! - `gomoku-mcts` - Play on a 15x15 board, five in a row
//! - `gomoku-mcts play --size 9 --win-len 4 --first agent` - Custom game
//! - `gomoku-mcts demo` - Watch two agents play each other
//!
//! Set `RUST_LOG=debug` to see search progress.

use std::io;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use gomoku_mcts::board::Outcome;
use gomoku_mcts::config::Config;
use gomoku_mcts::constants::{
    DEFAULT_SIZE, DEFAULT_WIN_LEN, DEMO_SIMS, DEMO_SIZE, DEMO_WIN_LEN, N_SIMS,
};
use gomoku_mcts::play::{First, Session, self_play};

/// gomoku-mcts: Gomoku against a Monte Carlo Tree Search agent
#[derive(Parser)]
#[command(name = "gomoku-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the agent in the terminal
    Play(PlayArgs),
    /// Watch two agents play each other
    Demo(DemoArgs),
}

#[derive(Args)]
struct PlayArgs {
    /// Board size (NxN)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Stones in a row needed to win
    #[arg(long, default_value_t = DEFAULT_WIN_LEN)]
    win_len: usize,
    /// Search iterations per agent move
    #[arg(long, default_value_t = N_SIMS)]
    searches: usize,
    /// Who places the first stone
    #[arg(long, value_enum, default_value_t = First::Human)]
    first: First,
    /// Seed for the agent's random number generator
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            win_len: DEFAULT_WIN_LEN,
            searches: N_SIMS,
            first: First::Human,
            seed: None,
        }
    }
}

#[derive(Args)]
struct DemoArgs {
    #[arg(long, default_value_t = DEMO_SIZE)]
    size: usize,
    #[arg(long, default_value_t = DEMO_WIN_LEN)]
    win_len: usize,
    #[arg(long, default_value_t = DEMO_SIMS)]
    searches: usize,
    #[arg(long)]
    seed: Option<u64>,
}

fn config(size: usize, win_len: usize, searches: usize, seed: Option<u64>) -> Config {
    Config {
        seed,
        ..Config::new(size, win_len, searches)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => run_play(args),
        Some(Commands::Demo(args)) => run_demo(args),
        None => run_play(PlayArgs::default()),
    }
}

fn run_play(args: PlayArgs) -> Result<()> {
    let config = config(args.size, args.win_len, args.searches, args.seed);
    let mut session = Session::new(config, args.first).context("invalid game settings")?;
    session.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

fn run_demo(args: DemoArgs) -> Result<()> {
    println!("gomoku-mcts: agent vs agent\n");
    println!(
        "{}x{} board, {} in a row, {} searches per move",
        args.size, args.size, args.win_len, args.searches
    );

    let config = config(args.size, args.win_len, args.searches, args.seed);
    let board = self_play(config).context("invalid game settings")?;

    println!("{board}");
    for (i, (row, col)) in board.history().iter().enumerate() {
        println!("{:3}. {row} {col}", i + 1);
    }
    match board.outcome() {
        Some(Outcome::Win(color)) => println!("Winner: {color}"),
        Some(Outcome::Draw) => println!("Draw"),
        None => println!("Game unfinished"),
    }
    Ok(())
}
