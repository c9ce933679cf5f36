//! gomoku-mcts: a Monte Carlo Tree Search Gomoku engine.
//!
//! The agent keeps a single search tree for the whole game and moves its
//! root along with the real moves, so search effort carries over from one
//! turn to the next.
//!
//! ## Modules
//!
//! - [`constants`] - Default board geometry and search parameters
//! - [`config`] - Validated agent settings
//! - [`board`] - Game rules: placement, legality, win detection
//! - [`tree`] - Arena-backed search tree
//! - [`playout`] - Random game simulation for position evaluation
//! - [`mcts`] - The search agent
//! - [`play`] - Text driver for human play and agent-vs-agent games
//!
//! ## Example
//!
//! ```
//! use gomoku_mcts::config::Config;
//! use gomoku_mcts::mcts::Agent;
//!
//! let mut agent = Agent::new(Config::new(9, 5, 200).with_seed(1)).unwrap();
//!
//! // The human opens in the center; the agent searches and replies.
//! let reply = agent.search((4, 4)).unwrap();
//! assert!(agent.board().get(reply.0, reply.1).is_some());
//! println!("{}", agent.board());
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod mcts;
pub mod play;
pub mod playout;
pub mod tree;
