//! Text driver for playing against the agent.
//!
//! The session reads moves as `row col` lines, one per turn, and writes the
//! board after every exchange. Input and output are generic so the loop can
//! run against stdin/stdout or against in-memory buffers.
//!
//! ## Example
//!
//! ```no_run
//! use std::io;
//! use gomoku_mcts::config::Config;
//! use gomoku_mcts::play::{First, Session};
//!
//! let mut session = Session::new(Config::default(), First::Human).unwrap();
//! session.run(io::stdin().lock(), io::stdout().lock()).unwrap();
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow, bail};
use clap::ValueEnum;

use crate::board::{Board, Outcome, Point};
use crate::config::{Config, ConfigError};
use crate::mcts::Agent;

/// Who places the first (black) stone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum First {
    #[default]
    Human,
    Agent,
}

/// Parse `row col` (whitespace or comma separated).
pub fn parse_point(line: &str) -> Option<Point> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

/// A game between a human and the agent.
pub struct Session {
    agent: Agent,
    first: First,
}

impl Session {
    pub fn new(config: Config, first: First) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: Agent::new(config)?,
            first,
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Play a whole game, returning its result.
    ///
    /// Fails if `input` runs out before the game ends.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<Outcome> {
        if self.first == First::Agent {
            let center = self.agent.config().center();
            self.agent.promote_root(center);
            writeln!(output, "Agent plays {} {}", center.0, center.1)?;
        }

        loop {
            writeln!(output, "{}", self.agent.board())?;
            if self.agent.is_ended() {
                break;
            }
            let mv = self.read_move(&mut input, &mut output)?;
            if let Some(reply) = self.agent.search(mv) {
                writeln!(output, "Agent plays {} {}", reply.0, reply.1)?;
            }
        }

        let outcome = self
            .agent
            .board()
            .outcome()
            .ok_or_else(|| anyhow!("game ended without a result"))?;
        match outcome {
            Outcome::Win(color) => writeln!(output, "Winner: {color}")?,
            Outcome::Draw => writeln!(output, "Draw")?,
        }
        Ok(outcome)
    }

    /// Prompt until a legal move is entered.
    fn read_move<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<Point> {
        loop {
            write!(output, "Your move (row col): ")?;
            output.flush()?;
            let mut line = String::new();
            let n = input.read_line(&mut line).context("failed to read move")?;
            if n == 0 {
                bail!("input closed before the game ended");
            }
            match parse_point(&line) {
                Some(pt) if self.agent.is_legal(pt) => return Ok(pt),
                Some((row, col)) => {
                    writeln!(output, "Cannot play a stone at ({row}, {col}). Try again.")?
                }
                None => writeln!(output, "Expected two numbers, e.g. `7 7`.")?,
            }
        }
    }
}

/// Let two agents with the same settings play each other.
///
/// Black opens at the center; the second agent gets the next seed so the
/// two do not mirror each other. Returns the final board.
pub fn self_play(config: Config) -> Result<Board, ConfigError> {
    let mut second = config.clone();
    second.seed = config.seed.map(|s| s.wrapping_add(1));

    let mut black = Agent::new(config)?;
    let mut white = Agent::new(second)?;

    let mut last = black.config().center();
    black.promote_root(last);
    loop {
        match white.search(last) {
            Some(reply) => last = reply,
            None => return Ok(white.board().clone()),
        }
        match black.search(last) {
            Some(reply) => last = reply,
            None => return Ok(black.board().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn all_points(size: usize) -> String {
        let mut script = String::new();
        for r in 0..size {
            for c in 0..size {
                script.push_str(&format!("{r} {c}\n"));
            }
        }
        script
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("7 7\n"), Some((7, 7)));
        assert_eq!(parse_point("  3,  12 "), Some((3, 12)));
        assert_eq!(parse_point("3"), None);
        assert_eq!(parse_point("3 4 5"), None);
        assert_eq!(parse_point("-1 4"), None);
        assert_eq!(parse_point("a b"), None);
    }

    #[test]
    fn test_session_plays_to_the_end() {
        let config = Config::new(3, 3, 50).with_seed(1);
        let mut session = Session::new(config, First::Human).unwrap();
        let mut out = Vec::new();
        let outcome = session.run(Cursor::new(all_points(3)), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Agent plays"));
        assert_eq!(session.agent().board().outcome(), Some(outcome));
        match outcome {
            Outcome::Win(color) => assert!(text.contains(&format!("Winner: {color}"))),
            Outcome::Draw => assert!(text.contains("Draw")),
        }
    }

    #[test]
    fn test_session_agent_opens_center() {
        let config = Config::new(3, 3, 50).with_seed(2);
        let mut session = Session::new(config, First::Agent).unwrap();
        let mut out = Vec::new();
        let script = format!("1 1\nnonsense\n{}", all_points(3));
        session.run(Cursor::new(script), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Agent plays 1 1\n"));
        assert!(text.contains("Cannot play a stone at (1, 1). Try again."));
        assert!(text.contains("Expected two numbers"));
        assert_eq!(session.agent().board().history()[0], (1, 1));
    }

    #[test]
    fn test_session_fails_on_closed_input() {
        let config = Config::new(5, 3, 10).with_seed(3);
        let mut session = Session::new(config, First::Human).unwrap();
        let err = session.run(Cursor::new("2 2\n"), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }

    #[test]
    fn test_self_play_finishes() {
        let board = self_play(Config::new(5, 3, 100).with_seed(5)).unwrap();
        assert!(board.outcome().is_some());
        assert_eq!(board.history()[0], (2, 2));
    }
}
