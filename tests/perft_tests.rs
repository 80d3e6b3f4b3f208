use chess_core::board::{perft, Board};

struct TestPosition {
    name: &'static str,
    fen: &'static str,
    depths: &'static [(u32, u64)],
}

const TEST_POSITIONS: &[TestPosition] = &[
    TestPosition {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depths: &[(1, 20), (2, 400), (3, 8902), (4, 197_281)],
    },
    TestPosition {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depths: &[(1, 48), (2, 2039), (3, 97_862)],
    },
    TestPosition {
        name: "endgame rook and king",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depths: &[(1, 14), (2, 191), (3, 2812)],
    },
];

/// The canonical deep perft oracle values, expensive enough (tens to
/// hundreds of millions of nodes) that they run only on request via
/// `cargo test -- --ignored`, not on every `cargo test`.
const DEEP_TEST_POSITIONS: &[TestPosition] = &[
    TestPosition {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depths: &[(5, 4_865_609), (6, 119_060_324)],
    },
    TestPosition {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depths: &[(4, 4_085_603), (5, 193_690_690)],
    },
    TestPosition {
        name: "endgame rook and king",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depths: &[(6, 11_030_083)],
    },
];

#[test]
fn perft_matches_known_node_counts() {
    for position in TEST_POSITIONS {
        let mut board = Board::from_fen(position.fen).expect("valid FEN");
        for &(depth, expected) in position.depths {
            let nodes = perft(&mut board, depth);
            assert_eq!(nodes, expected, "perft mismatch for {} at depth {depth}", position.name);
        }
    }
}

#[test]
#[ignore]
fn perft_matches_deep_canonical_oracle_values() {
    for position in DEEP_TEST_POSITIONS {
        let mut board = Board::from_fen(position.fen).expect("valid FEN");
        for &(depth, expected) in position.depths {
            let nodes = perft(&mut board, depth);
            assert_eq!(nodes, expected, "perft mismatch for {} at depth {depth}", position.name);
        }
    }
}
