use std::sync::Arc;

use chess_core::board::Board;
use chess_core::search::{Engine, SearchLimits, StopController};
use chess_core::tt::MATE_THRESHOLD;

fn search_to_depth(fen: &str, depth: u32) -> chess_core::search::SearchResult {
    let board = Board::from_fen(fen).expect("valid FEN");
    let engine = Engine::new(8, 1);
    let limits = SearchLimits {
        depth: Some(depth),
        ..Default::default()
    };
    let stop_ctl = StopController::new();
    engine.go(&board, &limits, stop_ctl.handle(), |_| {})
}

#[test]
fn finds_back_rank_mate_in_one() {
    // White rook delivers mate on the back rank; no escape square for black's king.
    let result = search_to_depth("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 3);
    assert!(result.score.abs() > MATE_THRESHOLD, "expected a mate score, got {}", result.score);
    assert_eq!(result.best_move.from().to_string(), "a1");
}

#[test]
fn finds_corner_queen_mate_in_one() {
    // Qa7-g7# supported by the king on g6; the black king on h8 has no escape square.
    let result = search_to_depth("7k/Q7/6K1/8/8/8/8/8 w - - 0 1", 3);
    assert!(result.score.abs() > MATE_THRESHOLD, "expected a mate score, got {}", result.score);
    assert_eq!(result.best_move.to().to_string(), "g7");
}

#[test]
fn takes_a_hanging_rook() {
    let board = Board::from_fen("3r2k1/8/8/8/8/8/8/3QK3 w - - 0 1").expect("valid FEN");
    let legal = board.generate_legal_moves();
    let engine = Engine::new(8, 1);
    let limits = SearchLimits {
        depth: Some(3),
        ..Default::default()
    };
    let stop_ctl = StopController::new();
    let result = engine.go(&board, &limits, stop_ctl.handle(), |_| {});
    assert!(legal.contains(result.best_move));
    assert_eq!(result.best_move.to().to_string(), "d8");
    assert!(result.best_move.is_capture());
}

#[test]
fn stop_flag_aborts_a_search_in_progress() {
    let board = Board::from_fen(chess_core::board::STARTPOS_FEN).expect("valid FEN");
    let engine = Engine::new(8, 1);
    let limits = SearchLimits {
        depth: Some(40),
        ..Default::default()
    };
    let stop_ctl = StopController::new();
    stop_ctl.stop();
    let result = engine.go(&board, &limits, stop_ctl.handle(), |_| {});
    assert_eq!(result.depth, 0);
}

#[test]
fn multi_threaded_search_still_returns_a_legal_move() {
    let board = Board::from_fen(chess_core::board::STARTPOS_FEN).expect("valid FEN");
    let engine = Engine::new(8, 4);
    let limits = SearchLimits {
        depth: Some(5),
        ..Default::default()
    };
    let stop_ctl = StopController::new();
    let result = engine.go(&board, &limits, stop_ctl.handle(), |_| {});
    let legal = board.generate_legal_moves();
    assert!(legal.contains(result.best_move));
}

#[test]
fn transposition_table_survives_repeated_searches_through_one_engine() {
    let board = Board::from_fen(chess_core::board::STARTPOS_FEN).expect("valid FEN");
    let engine = Engine::new(8, 1);
    let limits = SearchLimits {
        depth: Some(4),
        ..Default::default()
    };
    let _ = engine.go(&board, &limits, Arc::new(std::sync::atomic::AtomicBool::new(false)), |_| {});
    assert!(engine.hashfull_permille() > 0, "expected the shared TT to have entries after a search");
}
