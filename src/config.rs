//! Agent configuration: board geometry and search budget.

use thiserror::Error;

use crate::constants::{DEFAULT_SIZE, DEFAULT_WIN_LEN, MAX_BOARD_SIZE, N_SIMS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size must be between 1 and {} (got {})", MAX_BOARD_SIZE, .0)]
    BadSize(usize),
    #[error("win length must be between 1 and the board size {size} (got {win_len})")]
    BadWinLen { size: usize, win_len: usize },
    #[error("search budget must be at least one iteration")]
    NoSearches,
}

/// Settings fixed for the lifetime of an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub size: usize,
    pub win_len: usize,
    /// Search iterations per move
    pub max_searches: usize,
    /// RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            win_len: DEFAULT_WIN_LEN,
            max_searches: N_SIMS,
            seed: None,
        }
    }
}

impl Config {
    pub fn new(size: usize, win_len: usize, max_searches: usize) -> Self {
        Self {
            size,
            win_len,
            max_searches,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 || self.size > MAX_BOARD_SIZE {
            return Err(ConfigError::BadSize(self.size));
        }
        if self.win_len == 0 || self.win_len > self.size {
            return Err(ConfigError::BadWinLen {
                size: self.size,
                win_len: self.win_len,
            });
        }
        if self.max_searches == 0 {
            return Err(ConfigError::NoSearches);
        }
        Ok(())
    }

    /// Center point of the board, used for the agent's opening move.
    pub fn center(&self) -> (usize, usize) {
        let c = (self.size - 1) / 2;
        (c, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert_eq!(config.size, 15);
        assert_eq!(config.win_len, 5);
        assert_eq!(config.max_searches, 10000);
        assert!(config.validate().is_ok());
        assert_eq!(config.center(), (7, 7));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(Config::new(0, 1, 10).validate(), Err(ConfigError::BadSize(0)));
        assert_eq!(
            Config::new(MAX_BOARD_SIZE + 1, 5, 10).validate(),
            Err(ConfigError::BadSize(MAX_BOARD_SIZE + 1))
        );
        assert_eq!(
            Config::new(5, 6, 10).validate(),
            Err(ConfigError::BadWinLen { size: 5, win_len: 6 })
        );
        assert_eq!(
            Config::new(5, 0, 10).validate(),
            Err(ConfigError::BadWinLen { size: 5, win_len: 0 })
        );
        assert_eq!(Config::new(5, 3, 0).validate(), Err(ConfigError::NoSearches));
    }

    #[test]
    fn test_center() {
        assert_eq!(Config::new(5, 3, 1).center(), (2, 2));
        assert_eq!(Config::new(4, 3, 1).center(), (1, 1));
    }
}
