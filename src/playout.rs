//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random moves next to existing stones until the
//! game ends, then reports who won. No heuristics are applied.

use fastrand::Rng;

use crate::board::{Board, Color};

/// Play random adjacent moves on `board` until the game ends.
///
/// Returns the winner, or `None` for a draw.
pub fn random_playout(board: &mut Board, rng: &mut Rng) -> Option<Color> {
    while !board.is_ended() {
        let candidates = board.adjacent_vacancies();
        let pt = if candidates.is_empty() {
            // Only an empty board has no stone to play next to.
            let c = (board.size() - 1) / 2;
            (c, c)
        } else {
            candidates[rng.usize(..candidates.len())]
        };
        board.play_stone(pt);
    }
    board.winner()
}

/// Reward of a finished game from `perspective`'s point of view:
/// +1 for a win, -1 for a loss, 0 for a draw.
#[inline]
pub fn reward(winner: Option<Color>, perspective: Color) -> i32 {
    match winner {
        Some(c) if c == perspective => 1,
        Some(_) => -1,
        None => 0,
    }
}
