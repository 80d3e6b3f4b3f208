//! Static Exchange Evaluation: the net material swing of a capture
//! sequence on one square, used by move ordering and by the search's
//! losing-capture pruning.

use crate::types::{Bitboard, Color, Move, Piece};

use super::state::Board;

impl Board {
    /// The SEE score of playing `mv`: positive means the capturing side
    /// comes out ahead once all recaptures on `mv.to()` are resolved in
    /// value order. Non-captures are scored zero.
    #[must_use]
    pub fn see(&self, mv: Move) -> i32 {
        if !mv.is_capture() {
            return 0;
        }
        let to = mv.to();
        let from = mv.from();
        let mut side = self.side_to_move;

        let mut occ = self.all_occupancy();
        let mut gain = [0i32; 32];
        let mut depth = 0usize;

        let initial_captured_value = if mv.is_en_passant() {
            Piece::Pawn.value()
        } else {
            self.piece_at(to).map_or(0, |(_, p)| p.value())
        };
        let (_, mut attacker_piece) = self.piece_at(from).expect("see: no piece on from-square");

        gain[0] = initial_captured_value;
        occ &= !Bitboard::from_square(from);
        if mv.is_en_passant() {
            let captured_sq = crate::types::Square::new(from.rank(), to.file());
            occ &= !Bitboard::from_square(captured_sq);
        }

        loop {
            side = side.opponent();
            depth += 1;
            gain[depth] = attacker_piece.value() - gain[depth - 1];
            if gain[depth].max(-gain[depth - 1]) < 0 {
                break;
            }

            let attackers = self.all_attackers_to(to, occ) & occ;
            let side_attackers = attackers & self.occupancy(side);
            match least_valuable_attacker(self, side_attackers) {
                None => break,
                Some((sq, piece)) => {
                    occ &= !Bitboard::from_square(sq);
                    attacker_piece = piece;
                }
            }
        }

        while depth > 0 {
            gain[depth - 1] = -gain[depth].max(-gain[depth - 1]);
            depth -= 1;
        }
        gain[0]
    }
}

fn least_valuable_attacker(board: &Board, attackers: Bitboard) -> Option<(crate::types::Square, Piece)> {
    for &piece in &crate::types::ALL_PIECES {
        for color in [Color::White, Color::Black] {
            let candidates = attackers & board.pieces_of(color, piece);
            if let Some(sq) = candidates.lsb_square() {
                return Some((sq, piece));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS_FEN;

    #[test]
    fn pawn_takes_undefended_pawn_is_winning() {
        let board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mv = board.parse_move("e4d5").unwrap();
        assert_eq!(board.see(mv), Piece::Pawn.value());
    }

    #[test]
    fn losing_capture_scores_negative() {
        let board = Board::from_fen("4k3/3p4/8/8/3n4/8/3R4/4K3 w - - 0 1").unwrap();
        let mv = board.parse_move("d2d4").unwrap();
        assert!(board.see(mv) < 0, "rook takes knight defended by pawn should lose material");
    }

    #[test]
    fn non_capture_is_zero() {
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        let mv = board.parse_move("e2e4").unwrap();
        assert_eq!(board.see(mv), 0);
    }
}
