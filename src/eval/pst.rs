//! Material values and piece-square tables, midgame and endgame variants.
//! Tables are written from White's perspective with rank 0 (the first
//! rank) at index 0; lookups flip the square vertically for Black.

use crate::types::{Color, Piece, Square};

#[rustfmt::skip]
const PAWN_MG: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,   5,  10,  25,  25,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const PAWN_EG: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     10,  10,  10,  10,  10,  10,  10,  10,
     10,  10,  10,  10,  10,  10,  10,  10,
     20,  20,  20,  20,  20,  20,  20,  20,
     35,  35,  35,  35,  35,  35,  35,  35,
     60,  60,  60,  60,  60,  60,  60,  60,
     90,  90,  90,  90,  90,  90,  90,  90,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_MG: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

const KNIGHT_EG: [i32; 64] = KNIGHT_MG;

#[rustfmt::skip]
const BISHOP_MG: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

const BISHOP_EG: [i32; 64] = BISHOP_MG;

#[rustfmt::skip]
const ROOK_MG: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

const ROOK_EG: [i32; 64] = ROOK_MG;

#[rustfmt::skip]
const QUEEN_MG: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

const QUEEN_EG: [i32; 64] = QUEEN_MG;

#[rustfmt::skip]
const KING_MG: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

#[rustfmt::skip]
const KING_EG: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

fn table(piece: Piece, midgame: bool) -> &'static [i32; 64] {
    match (piece, midgame) {
        (Piece::Pawn, true) => &PAWN_MG,
        (Piece::Pawn, false) => &PAWN_EG,
        (Piece::Knight, true) => &KNIGHT_MG,
        (Piece::Knight, false) => &KNIGHT_EG,
        (Piece::Bishop, true) => &BISHOP_MG,
        (Piece::Bishop, false) => &BISHOP_EG,
        (Piece::Rook, true) => &ROOK_MG,
        (Piece::Rook, false) => &ROOK_EG,
        (Piece::Queen, true) => &QUEEN_MG,
        (Piece::Queen, false) => &QUEEN_EG,
        (Piece::King, true) => &KING_MG,
        (Piece::King, false) => &KING_EG,
    }
}

/// Piece-square value for `piece` of `color` sitting on `sq`, midgame and
/// endgame variants, already oriented (White reads the table top-down from
/// its own first rank; Black's square is flipped).
#[must_use]
pub(crate) fn pst_value(piece: Piece, color: Color, sq: Square, midgame: bool) -> i32 {
    let oriented = if color == Color::Black { sq.flip_vertical() } else { sq };
    table(piece, midgame)[oriented.as_index()]
}

/// Standard material value plus the phase weight used by the tapered mix:
/// 0 for pawns/kings, 1 for minors, 2 for rooks, 4 for the queen; the game
/// starts at phase 24 and trends toward 0.
#[must_use]
pub(crate) const fn phase_weight(piece: Piece) -> i32 {
    match piece {
        Piece::Knight | Piece::Bishop => 1,
        Piece::Rook => 2,
        Piece::Queen => 4,
        Piece::Pawn | Piece::King => 0,
    }
}

pub(crate) const MAX_PHASE: i32 = 24;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_advance_is_rewarded_in_the_endgame_table() {
        let rank7 = Square::new(6, 4);
        assert!(pst_value(Piece::Pawn, Color::White, rank7, false) > 0);
    }

    #[test]
    fn king_prefers_corners_in_midgame_center_in_endgame() {
        let e1 = Square::new(0, 4);
        let e4 = Square::new(3, 4);
        assert!(pst_value(Piece::King, Color::White, e1, true) > pst_value(Piece::King, Color::White, e4, true));
        assert!(pst_value(Piece::King, Color::White, e4, false) > pst_value(Piece::King, Color::White, e1, false));
    }

    #[test]
    fn black_table_lookup_is_vertically_mirrored() {
        let a1 = Square::new(0, 0);
        let a8 = Square::new(7, 0);
        assert_eq!(
            pst_value(Piece::Pawn, Color::White, a1, true),
            pst_value(Piece::Pawn, Color::Black, a8, true)
        );
    }
}
