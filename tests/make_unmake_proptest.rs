//! Property tests over make/unmake and the incremental Zobrist hash: for any
//! sequence of legal moves played from a handful of starting positions,
//! unmaking must restore the exact FEN, and the incrementally maintained
//! hash must always agree with a hash recomputed from scratch.

use chess_core::board::Board;
use proptest::prelude::*;

const STARTING_FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
];

fn play_random_line(board: &mut Board, move_indices: &[usize]) -> Vec<(chess_core::types::Move, chess_core::board::UndoInfo)> {
    let mut played = Vec::new();
    for &idx in move_indices {
        let legal = board.generate_legal_moves();
        if legal.len() == 0 {
            break;
        }
        let mv = legal.get(idx % legal.len()).expect("index within bounds");
        let undo = board.make_move(mv);
        played.push((mv, undo));
    }
    played
}

proptest! {
    #[test]
    fn unmake_restores_the_exact_position(
        start_idx in 0usize..STARTING_FENS.len(),
        move_indices in prop::collection::vec(0usize..40, 0..12),
    ) {
        let mut board = Board::from_fen(STARTING_FENS[start_idx]).unwrap();
        let original_fen = board.to_fen();

        let played = play_random_line(&mut board, &move_indices);

        for (mv, undo) in played.into_iter().rev() {
            board.unmake_move(mv, undo);
        }

        prop_assert_eq!(board.to_fen(), original_fen);
    }

    #[test]
    fn incremental_hash_matches_a_hash_recomputed_from_scratch(
        start_idx in 0usize..STARTING_FENS.len(),
        move_indices in prop::collection::vec(0usize..40, 0..12),
    ) {
        let mut board = Board::from_fen(STARTING_FENS[start_idx]).unwrap();
        let _ = play_random_line(&mut board, &move_indices);

        let incremental = board.hash();
        let recomputed = Board::from_fen(&board.to_fen()).unwrap().hash();
        prop_assert_eq!(incremental, recomputed);
    }

    #[test]
    fn null_move_make_unmake_round_trips(start_idx in 0usize..STARTING_FENS.len()) {
        let fen = STARTING_FENS[start_idx];
        let mut board = Board::from_fen(fen).unwrap();
        if board.is_in_check(board.side_to_move()) {
            return Ok(());
        }
        let original_fen = board.to_fen();
        let undo = board.make_null_move();
        board.unmake_null_move(undo);
        prop_assert_eq!(board.to_fen(), original_fen);
    }
}
