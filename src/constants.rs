//! Default board geometry and search parameters.
//!
//! These are the values used when no configuration is given on the command
//! line. Everything here can be overridden through [`crate::config::Config`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). 15x15 is the standard Gomoku board.
pub const DEFAULT_SIZE: usize = 15;

/// Default number of stones in a row needed to win.
pub const DEFAULT_WIN_LEN: usize = 5;

/// Largest supported board. Axis labels run out after `0-9A-Z`.
pub const MAX_BOARD_SIZE: usize = 36;

/// The four line directions checked for a win, as (row, col) steps.
/// Order: vertical, horizontal, diagonal, anti-diagonal.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of search iterations per move.
pub const N_SIMS: usize = 10000;

/// Exploration constant under the square root of the UCB1 bonus.
pub const UCB_EXPLORATION: f64 = 2.0;

/// Progress report period (number of iterations between reports).
pub const REPORT_PERIOD: usize = 1000;

// =============================================================================
// Demo Defaults
// =============================================================================

/// Board size for the agent-vs-agent demo.
pub const DEMO_SIZE: usize = 7;

/// Win length for the agent-vs-agent demo.
pub const DEMO_WIN_LEN: usize = 4;

/// Search budget per move for the agent-vs-agent demo.
pub const DEMO_SIMS: usize = 400;
