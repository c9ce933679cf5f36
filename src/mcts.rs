//! Monte Carlo Tree Search agent.
//!
//! The agent keeps one persistent tree for the whole game. Every real move
//! (the human's and its own) is promoted to the root, so statistics gathered
//! for that subtree in earlier searches are reused.
//!
//! Each iteration:
//! - descends from the root with UCB1, trying every unvisited child first
//! - expands the leaf it reaches and steps into one of its children
//! - plays a random game to the end (see [`crate::playout`])
//! - propagates the result back up, flipping sign at every ply
//!
//! All simulated moves go to a private board that is rewound to the root
//! position after every iteration.

use fastrand::Rng;
use log::{debug, info, warn};

use crate::board::{Board, Color, Point};
use crate::config::{Config, ConfigError};
use crate::constants::{REPORT_PERIOD, UCB_EXPLORATION};
use crate::playout::{random_playout, reward};
use crate::tree::{NodeId, Tree, TreeNode};

/// Counters for the most recent [`Agent::search`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Iterations run
    pub iterations: usize,
    /// Nodes in the tree when the reply was chosen
    pub tree_size: usize,
    /// Sum of the root children's visits when the reply was chosen
    pub root_child_visits: u32,
    /// Visits of the chosen reply
    pub best_visits: u32,
}

/// UCB1 score of a visited child.
#[inline]
fn ucb1(value: f64, visits: u32, ln_total: f64) -> f64 {
    let v = visits as f64;
    value / v + (UCB_EXPLORATION * ln_total / v).sqrt()
}

pub struct Agent {
    tree: Tree,
    /// Node reached so far in the current iteration
    cursor: NodeId,
    /// Mirror of the game; holds the root position between iterations
    board: Board,
    config: Config,
    rng: Rng,
    stats: SearchStats,
}

impl Agent {
    /// Create an agent for a new game.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        let mut tree = Tree::default();
        let root = tree.root();
        tree.get_mut(root).visits += 1;
        Ok(Self {
            board: Board::new(config.size, config.win_len),
            tree,
            cursor: root,
            config,
            rng,
            stats: SearchStats::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The board at the current root position.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[inline]
    pub fn root(&self) -> &TreeNode {
        self.tree.get(self.tree.root())
    }

    #[inline]
    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    #[inline]
    pub fn last_stats(&self) -> &SearchStats {
        &self.stats
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.board.turn()
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.board.winner()
    }

    #[inline]
    pub fn is_legal(&self, pt: Point) -> bool {
        self.board.is_legal(pt)
    }

    /// Whether the last move played ended the game.
    pub fn is_ended(&mut self) -> bool {
        self.board.is_ended()
    }

    /// Make `mv` the root of the tree and play it on the board.
    ///
    /// If the cursor already has a child for `mv`, that subtree is kept with
    /// its statistics and the rest of the tree is dropped. Otherwise the tree
    /// is replaced by a single new node.
    pub fn promote_root(&mut self, mv: Point) {
        let root = match self.tree.find_child(self.cursor, mv) {
            Some(child) => self.tree.reroot(child),
            None => {
                let cur = self.tree.get(self.cursor);
                let node = TreeNode::new(None, cur.mover.opponent(), cur.depth + 1, Some(mv));
                self.tree = Tree::new(node);
                self.tree.root()
            }
        };
        self.visit(root);
    }

    /// Move the cursor to `id`, count the visit and play its move.
    pub fn visit(&mut self, id: NodeId) {
        self.cursor = id;
        let node = self.tree.get_mut(id);
        node.visits += 1;
        if let Some(mv) = node.mv {
            self.board.play_stone(mv);
        }
    }

    /// Pick the cursor child to descend into.
    ///
    /// Unvisited children come first, chosen uniformly at random. Once all
    /// have been visited the child with the highest UCB1 score wins, ties
    /// going to the earliest child.
    ///
    /// # Panics
    /// If the cursor has no children.
    pub fn select_child(&mut self) -> NodeId {
        let children = self.tree.children_of(self.cursor);
        assert!(
            !children.is_empty(),
            "select_child on childless node {}",
            self.cursor
        );

        let unvisited: Vec<NodeId> = children
            .iter()
            .copied()
            .filter(|&c| self.tree.get(c).visits == 0)
            .collect();
        if !unvisited.is_empty() {
            return unvisited[self.rng.usize(..unvisited.len())];
        }

        let total: u32 = children.iter().map(|&c| self.tree.get(c).visits).sum();
        let ln_total = (total as f64).ln();
        let mut best = children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &c in children {
            let node = self.tree.get(c);
            let score = ucb1(node.value, node.visits, ln_total);
            if score > best_score {
                best = c;
                best_score = score;
            }
        }
        best
    }

    /// The root child with the most visits, ties going to the earliest.
    ///
    /// # Panics
    /// If the root has no children.
    pub fn best_child(&self) -> NodeId {
        let root = self.tree.root();
        let children = self.tree.children_of(root);
        assert!(!children.is_empty(), "best_child on childless root {root}");

        let mut best = children[0];
        for &c in &children[1..] {
            if self.tree.get(c).visits > self.tree.get(best).visits {
                best = c;
            }
        }
        best
    }

    /// Give the cursor one child per empty point next to a stone.
    pub fn expand(&mut self) {
        if !self.tree.children_of(self.cursor).is_empty() {
            warn!("node {} is already expanded", self.cursor);
            return;
        }
        for mv in self.board.adjacent_vacancies() {
            self.tree.add_child(self.cursor, mv);
        }
    }

    /// Play the game out at random and score it for the cursor's mover.
    pub fn rollout(&mut self) -> i32 {
        let winner = random_playout(&mut self.board, &mut self.rng);
        reward(winner, self.tree.get(self.cursor).mover)
    }

    /// Add `reward` to every node from the cursor up to, but not including,
    /// the root, negating it at each step. Leaves the cursor at the root.
    pub fn backpropagate(&mut self, reward: i32) {
        let mut reward = reward as f64;
        while let Some(parent) = self.tree.get(self.cursor).parent {
            self.tree.get_mut(self.cursor).value += reward;
            reward = -reward;
            self.cursor = parent;
        }
    }

    /// Put the board back to the root position.
    fn reset_board(&mut self) {
        let root = self.tree.root();
        let depth = self.tree.get(root).depth;
        self.board.rewind(depth);
        self.cursor = root;
        debug_assert_eq!(self.board.turn(), self.tree.get(root).mover.opponent());
    }

    /// Run one select, expand, rollout, backpropagate cycle from the root.
    pub fn run_iteration(&mut self) {
        while !self.tree.children_of(self.cursor).is_empty() && !self.board.is_ended() {
            let child = self.select_child();
            self.visit(child);
        }

        // Terminal positions are scored as they are, never expanded.
        if self.tree.get(self.cursor).visits > 0 && !self.board.is_ended() {
            self.expand();
            if !self.tree.children_of(self.cursor).is_empty() {
                let child = self.select_child();
                self.visit(child);
            }
        }

        let reward = self.rollout();
        self.backpropagate(reward);
        self.reset_board();
        self.stats.iterations += 1;
    }

    /// Play `mv` for the opponent, search, and play the agent's reply.
    ///
    /// Returns the reply, or `None` if `mv` was illegal or ended the game.
    pub fn search(&mut self, mv: Point) -> Option<Point> {
        if !self.board.is_legal(mv) {
            warn!("rejecting illegal move {mv:?}");
            return None;
        }
        self.promote_root(mv);
        if self.board.is_ended() {
            return None;
        }

        self.stats = SearchStats::default();
        let max_searches = self.config.max_searches;
        for i in 0..max_searches {
            self.run_iteration();
            if (i + 1) % REPORT_PERIOD == 0 {
                debug!(
                    "searched {}/{} ({}%), {} nodes",
                    i + 1,
                    max_searches,
                    (i + 1) * 100 / max_searches,
                    self.tree.len()
                );
            }
        }

        let root = self.tree.root();
        let best = self.best_child();
        let best_node = self.tree.get(best);
        self.stats.tree_size = self.tree.len();
        self.stats.best_visits = best_node.visits;
        self.stats.root_child_visits = self
            .tree
            .children_of(root)
            .iter()
            .map(|&c| self.tree.get(c).visits)
            .sum();

        let reply = best_node.mv?;
        info!(
            "playing {reply:?} after {} iterations ({} visits, {} nodes)",
            self.stats.iterations, self.stats.best_visits, self.stats.tree_size
        );
        self.promote_root(reply);
        Some(reply)
    }
}
