//! Integration tests for gomoku-mcts
//!
//! These drive the public API the way the text driver does: moves are
//! checked with `is_legal`, fed to `search`, and the board is inspected
//! between turns.

use gomoku_mcts::board::{Board, Color, Outcome, Point};
use gomoku_mcts::config::Config;
use gomoku_mcts::mcts::Agent;
use gomoku_mcts::play::self_play;

// =============================================================================
// Helper functions
// =============================================================================

/// Play moves alternately from Black, returning whether the last one ended
/// the game. Fails if any earlier move ends it.
fn setpos(board: &mut Board, moves: &[Point]) -> bool {
    for (i, &pt) in moves.iter().enumerate() {
        board.try_play(pt).unwrap();
        let ended = board.is_ended();
        if i + 1 < moves.len() {
            assert!(!ended, "game ended early at move {} {:?}", i + 1, pt);
        } else {
            return ended;
        }
    }
    false
}

fn seeded(size: usize, win_len: usize, searches: usize, seed: u64) -> Agent {
    Agent::new(Config::new(size, win_len, searches).with_seed(seed)).unwrap()
}

// =============================================================================
// Board
// =============================================================================

#[test]
fn test_legality_over_whole_board() {
    let mut board = Board::new(5, 3);
    board.play_stone((1, 2));
    board.play_stone((3, 3));
    for row in 0..7 {
        for col in 0..7 {
            let expected = row < 5 && col < 5 && (row, col) != (1, 2) && (row, col) != (3, 3);
            assert_eq!(board.is_legal((row, col)), expected, "({row}, {col})");
        }
    }
}

#[test]
fn test_three_in_a_row_detected_on_completing_move() {
    // 5x5, three to win; Black completes a diagonal on its third stone.
    let mut board = Board::new(5, 3);
    let moves = [(0, 0), (0, 4), (1, 1), (4, 0), (2, 2)];
    assert!(setpos(&mut board, &moves));
    assert_eq!(board.winner(), Some(Color::Black));
}

#[test]
fn test_three_in_a_row_white() {
    let mut board = Board::new(5, 3);
    let moves = [(0, 0), (4, 2), (0, 2), (3, 2), (4, 4), (2, 2)];
    assert!(setpos(&mut board, &moves));
    assert_eq!(board.winner(), Some(Color::White));
    assert_eq!(board.outcome(), Some(Outcome::Win(Color::White)));
}

#[test]
fn test_longer_line_than_needed_still_wins() {
    // Two separate pairs joined by the last stone make a run of five.
    let mut board = Board::new(9, 4);
    let moves = [
        (4, 0),
        (0, 0),
        (4, 1),
        (0, 2),
        (4, 3),
        (0, 4),
        (4, 4),
        (0, 6),
        (4, 2),
    ];
    assert!(setpos(&mut board, &moves));
    assert_eq!(board.winner(), Some(Color::Black));
}

// =============================================================================
// Agent
// =============================================================================

#[test]
fn test_search_advances_two_plies() {
    let mut agent = seeded(9, 5, 300, 17);
    let reply = agent.search((4, 4)).unwrap();

    assert_eq!(agent.board().history(), &[(4, 4), reply]);
    assert_eq!(agent.board().get(4, 4), Some(Color::Black));
    assert_eq!(agent.board().get(reply.0, reply.1), Some(Color::White));
    assert_eq!(agent.turn(), Color::Black);
    assert_eq!(agent.last_stats().iterations, 300);
    assert_eq!(agent.last_stats().root_child_visits, 300);
}

#[test]
fn test_tree_is_reused_across_moves() {
    let mut agent = seeded(7, 4, 400, 23);
    let reply = agent.search((3, 3)).unwrap();

    // Answer with the agent's most explored follow-up so its subtree survives.
    let root = agent.tree().root();
    let children = agent.tree().children_of(root);
    assert!(!children.is_empty());
    let next = children
        .iter()
        .copied()
        .max_by_key(|&c| agent.tree().get(c).visits)
        .unwrap();
    let prior_visits = agent.tree().get(next).visits;
    let mv = agent.tree().get(next).mv.unwrap();
    assert_ne!(mv, reply);

    agent.search(mv).unwrap();
    let stats = agent.last_stats();
    assert_eq!(stats.iterations, 400);
    assert_eq!(stats.root_child_visits, 400 + prior_visits);
    assert_eq!(agent.board().history().len(), 4);
}

#[test]
fn test_agent_blocks_four_threat() {
    // 7x7, four to win. Black has a three closed on the left by White, so
    // (3,5) is the only square that wins for Black next turn.
    let mut agent = seeded(7, 4, 4000, 31);
    for pt in [(3, 3), (3, 1), (3, 2), (6, 6)] {
        agent.promote_root(pt);
    }
    let reply = agent.search((3, 4)).unwrap();
    assert_eq!(reply, (3, 5));
    assert!(!agent.is_ended());
}

#[test]
fn test_full_game_against_scripted_player() {
    let mut agent = seeded(5, 3, 200, 8);
    let script: Vec<Point> = (0..5).flat_map(|r| (0..5).map(move |c| (r, c))).collect();

    let mut turns = 0;
    while !agent.is_ended() {
        let mv = script
            .iter()
            .copied()
            .find(|&pt| agent.is_legal(pt))
            .expect("board full but game not ended");
        agent.search(mv);
        turns += 1;
        assert!(turns <= 13);
    }
    assert!(agent.board().outcome().is_some());
    assert_eq!(agent.board().history().len(), agent.root().depth);
}

#[test]
fn test_self_play_game() {
    let board = self_play(Config::new(7, 4, 150).with_seed(99)).unwrap();
    assert!(board.outcome().is_some());
    assert_eq!(board.history()[0], (3, 3));
}
