//! Gomoku board: stone placement, legality and win detection.
//!
//! The board keeps the full move history so that a search can rewind it to
//! any earlier position. Win detection is incremental: [`Board::is_ended`]
//! only looks at the lines through the last stone placed.

use std::fmt;

use log::warn;
use thiserror::Error;

use crate::constants::DIRECTIONS;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "o"),
            Color::White => write!(f, "x"),
        }
    }
}

/// A board coordinate as (row, col).
pub type Point = (usize, usize);

/// Result of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Color),
    Draw,
}

/// Why a stone could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("cannot play a stone at {0:?}: outside the board")]
    OutOfBounds(Point),
    #[error("cannot play a stone at {0:?}: point not empty")]
    Occupied(Point),
}

#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    win_len: usize,
    cells: Vec<Option<Color>>,
    history: Vec<Point>,
    turn: Color,
    winner: Option<Color>,
}

impl Board {
    /// Create an empty board. Black moves first.
    pub fn new(size: usize, win_len: usize) -> Self {
        debug_assert!(size > 0 && win_len > 0 && win_len <= size);
        Self {
            size,
            win_len,
            cells: vec![None; size * size],
            history: Vec::with_capacity(size * size),
            turn: Color::Black,
            winner: None,
        }
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn win_len(&self) -> usize {
        self.win_len
    }

    /// Color of the stone at `(row, col)`, or `None` if empty or off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[self.idx(row, col)]
    }

    /// Color that places the next stone.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Winner found by the last call to [`Board::is_ended`].
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Moves played so far, in order.
    #[inline]
    pub fn history(&self) -> &[Point] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Point> {
        self.history.last().copied()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.history.len() == self.size * self.size
    }

    /// Result of the game as far as it is known: the cached winner, or a draw
    /// once the board is full.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.winner {
            Some(color) => Some(Outcome::Win(color)),
            None if self.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Whether a stone can be placed at `pt`.
    pub fn is_legal(&self, pt: Point) -> bool {
        let (row, col) = pt;
        row < self.size && col < self.size && self.cells[self.idx(row, col)].is_none()
    }

    /// Place a stone for the side to move, reporting why it was rejected.
    pub fn try_play(&mut self, pt: Point) -> Result<(), MoveError> {
        let (row, col) = pt;
        if row >= self.size || col >= self.size {
            return Err(MoveError::OutOfBounds(pt));
        }
        let idx = self.idx(row, col);
        if self.cells[idx].is_some() {
            return Err(MoveError::Occupied(pt));
        }
        self.cells[idx] = Some(self.turn);
        self.history.push(pt);
        self.turn = self.turn.opponent();
        Ok(())
    }

    /// Place a stone for the side to move.
    ///
    /// An illegal point is logged and ignored; the board is left unchanged.
    pub fn play_stone(&mut self, pt: Point) {
        if let Err(err) = self.try_play(pt) {
            warn!("{err}");
        }
    }

    /// All empty points within one step (any direction) of a played stone.
    ///
    /// Each point appears once, in the order it is first found while walking
    /// the history.
    pub fn adjacent_vacancies(&self) -> Vec<Point> {
        let mut seen = vec![false; self.size * self.size];
        let mut vacancies = Vec::new();
        for &(row, col) in &self.history {
            for r in row.saturating_sub(1)..=(row + 1).min(self.size - 1) {
                for c in col.saturating_sub(1)..=(col + 1).min(self.size - 1) {
                    let idx = self.idx(r, c);
                    if self.cells[idx].is_none() && !seen[idx] {
                        seen[idx] = true;
                        vacancies.push((r, c));
                    }
                }
            }
        }
        vacancies
    }

    /// Number of steps from `(row, col)` to the edge going in `(dr, dc)`.
    fn steps_to_edge(&self, row: usize, col: usize, dr: isize, dc: isize) -> usize {
        let along = |pos: usize, d: isize| match d {
            1 => self.size - 1 - pos,
            -1 => pos,
            _ => usize::MAX,
        };
        along(row, dr).min(along(col, dc))
    }

    /// Check whether the last stone ended the game, recording the winner.
    ///
    /// Only the four lines through the most recent stone are scanned, each
    /// within `win_len - 1` cells of it. This is only correct when called
    /// right after a placement: a line completed earlier elsewhere on the
    /// board is not seen.
    ///
    /// A full board with no winner is a draw: returns `true` with
    /// [`Board::winner`] still `None`.
    pub fn is_ended(&mut self) -> bool {
        let Some((row, col)) = self.last_move() else {
            return false;
        };
        let Some(color) = self.cells[self.idx(row, col)] else {
            return false;
        };
        let reach = self.win_len - 1;

        for (dr, dc) in DIRECTIONS {
            let back = self.steps_to_edge(row, col, -dr, -dc).min(reach) as isize;
            let fwd = self.steps_to_edge(row, col, dr, dc).min(reach) as isize;
            let mut run = 0;
            for k in -back..=fwd {
                let r = (row as isize + k * dr) as usize;
                let c = (col as isize + k * dc) as usize;
                if self.cells[self.idx(r, c)] == Some(color) {
                    run += 1;
                    if run == self.win_len {
                        self.winner = Some(color);
                        return true;
                    }
                } else {
                    run = 0;
                }
            }
        }

        self.is_full()
    }

    /// Reset the board to the position after the first `len` moves.
    ///
    /// The position is rebuilt from scratch by replaying the kept prefix;
    /// the cached winner is cleared.
    pub fn rewind(&mut self, len: usize) {
        self.history.truncate(len);
        self.cells.fill(None);
        let size = self.size;
        for (i, &(row, col)) in self.history.iter().enumerate() {
            self.cells[row * size + col] = Some(if i % 2 == 0 {
                Color::Black
            } else {
                Color::White
            });
        }
        self.turn = if self.history.len() % 2 == 0 {
            Color::Black
        } else {
            Color::White
        };
        self.winner = None;
    }
}

/// Axis label: `0-9` then `A-Z`.
fn axis_label(i: usize) -> char {
    char::from_digit(i as u32, 36)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?')
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..self.size {
            write!(f, " {}", axis_label(col))?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{}", axis_label(row))?;
            for col in 0..self.size {
                match self.get(row, col) {
                    Some(color) => write!(f, " {color}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
