//! Zobrist hashing for chess positions.
//!
//! The key is the XOR of per-feature random 64-bit words: one per
//! (piece, color, square), one for side-to-move, one per castling-rights
//! bit, and one per en-passant file. `Board::make_move`/`unmake_move`
//! maintain the key incrementally by XOR-ing only the words that changed;
//! `Board::recompute_hash` recomputes it from scratch for verification
//! (used by property test P2).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Color, Piece, Square};

pub(crate) struct ZobristKeys {
    /// `piece_keys[piece.index()][color.index()][square.index()]`
    piece_keys: [[[u64; 64]; 2]; 6],
    black_to_move_key: u64,
    /// Indexed by the castling-rights bit position (0=WK, 1=WQ, 2=BK, 3=BQ).
    castling_keys: [u64; 4],
    /// Indexed by file (0-7); only the en-passant target's file is hashed.
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    /// A fixed seed keeps hashes reproducible across runs and platforms,
    /// which matters for TT-based regression tests and for P2.
    const SEED: u64 = 0x5A0B_1577_C0FF_EE11;

    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(Self::SEED);
        let mut piece_keys = [[[0u64; 64]; 2]; 6];
        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let black_to_move_key = rng.gen();
        let mut castling_keys = [0u64; 4];
        for key in &mut castling_keys {
            *key = rng.gen();
        }
        let mut en_passant_keys = [0u64; 8];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }
        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

static ZOBRIST: once_cell::sync::Lazy<ZobristKeys> = once_cell::sync::Lazy::new(ZobristKeys::new);

#[inline]
pub(crate) fn piece_key(piece: Piece, color: Color, sq: Square) -> u64 {
    ZOBRIST.piece_keys[piece.index()][color.index()][sq.index()]
}

#[inline]
pub(crate) fn side_to_move_key() -> u64 {
    ZOBRIST.black_to_move_key
}

#[inline]
pub(crate) fn castling_key(bit_index: usize) -> u64 {
    ZOBRIST.castling_keys[bit_index]
}

#[inline]
pub(crate) fn en_passant_key(file: usize) -> u64 {
    ZOBRIST.en_passant_keys[file]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    #[test]
    fn keys_are_reproducible_across_calls() {
        let a = piece_key(Piece::Queen, Color::White, Square::new(3, 3));
        let b = piece_key(Piece::Queen, Color::White, Square::new(3, 3));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_features_get_distinct_keys() {
        let a = piece_key(Piece::Pawn, Color::White, Square::new(1, 0));
        let b = piece_key(Piece::Pawn, Color::Black, Square::new(1, 0));
        let c = piece_key(Piece::Knight, Color::White, Square::new(1, 0));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
