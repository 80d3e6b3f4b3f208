//! Make/unmake a move on the board, maintaining every incremental field
//! (occupancies, mailbox, Zobrist key, castling rights, en-passant target,
//! halfmove clock) in lockstep.

use crate::types::{
    CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q, CastlingRights, Color, Move,
    Piece, Square,
};
use crate::zobrist;

use super::state::{Board, NullUndoInfo, UndoInfo};

impl Board {
    /// Apply `mv`, which must be legal (or at least pseudo-legal and not
    /// leaving the mover's own king in check) in the current position.
    /// Returns the irreversible state needed to undo it.
    pub fn make_move(&mut self, mv: Move) -> UndoInfo {
        let mut undo = UndoInfo {
            captured: None,
            previous_en_passant: self.en_passant,
            previous_castling: self.castling,
            previous_halfmove_clock: self.halfmove_clock,
            previous_hash: self.hash,
        };
        let color = self.side_to_move;
        let opponent = color.opponent();
        let from = mv.from();
        let to = mv.to();
        let (_, piece) = self
            .piece_at(from)
            .expect("make_move: no piece on the from-square");

        if let Some(ep) = self.en_passant {
            self.hash ^= zobrist::en_passant_key(ep.file());
        }
        self.en_passant = None;

        if mv.is_en_passant() {
            let captured_sq = Square::new(from.rank(), to.file());
            self.remove_piece(captured_sq, opponent, Piece::Pawn);
            self.hash ^= zobrist::piece_key(Piece::Pawn, opponent, captured_sq);
            undo.captured = Some(Piece::Pawn);
        } else if let Some((_, captured_piece)) = self.piece_at(to) {
            self.remove_piece(to, opponent, captured_piece);
            self.hash ^= zobrist::piece_key(captured_piece, opponent, to);
            undo.captured = Some(captured_piece);
        }

        self.remove_piece(from, color, piece);
        self.hash ^= zobrist::piece_key(piece, color, from);

        if let Some(promo) = mv.promotion_piece() {
            self.place_piece(to, color, promo);
            self.hash ^= zobrist::piece_key(promo, color, to);
        } else {
            self.place_piece(to, color, piece);
            self.hash ^= zobrist::piece_key(piece, color, to);
        }

        if mv.is_castle_kingside() || mv.is_castle_queenside() {
            let rank = from.rank();
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (Square::new(rank, 7), Square::new(rank, 5))
            } else {
                (Square::new(rank, 0), Square::new(rank, 3))
            };
            self.remove_piece(rook_from, color, Piece::Rook);
            self.hash ^= zobrist::piece_key(Piece::Rook, color, rook_from);
            self.place_piece(rook_to, color, Piece::Rook);
            self.hash ^= zobrist::piece_key(Piece::Rook, color, rook_to);
        }

        if mv.is_double_pawn_push() {
            let ep_sq = Square::new(from.rank(), from.file());
            let ep_target = ep_sq
                .forward(color == Color::White)
                .expect("double pawn push always has a square behind it");
            self.en_passant = Some(ep_target);
            self.hash ^= zobrist::en_passant_key(ep_target.file());
        }

        self.update_castling_rights(from, to, piece);

        if piece == Piece::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = opponent;
        self.hash ^= zobrist::side_to_move_key();
        self.hash_history.push(self.hash);

        undo
    }

    /// Undo the most recent `make_move`. `mv` and `undo` must be exactly
    /// the pair returned by that call.
    pub fn unmake_move(&mut self, mv: Move, undo: UndoInfo) {
        self.hash_history.pop();
        let opponent = self.side_to_move;
        let color = opponent.opponent();
        self.side_to_move = color;

        let from = mv.from();
        let to = mv.to();

        if color == Color::Black {
            self.fullmove_number -= 1;
        }

        let moved_piece = if mv.is_promotion() {
            self.remove_piece(to, color, mv.promotion_piece().expect("promotion move"));
            Piece::Pawn
        } else {
            let (_, p) = self.piece_at(to).expect("unmake_move: no piece on to-square");
            self.remove_piece(to, color, p);
            p
        };
        self.place_piece(from, color, moved_piece);

        if mv.is_castle_kingside() || mv.is_castle_queenside() {
            let rank = from.rank();
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (Square::new(rank, 7), Square::new(rank, 5))
            } else {
                (Square::new(rank, 0), Square::new(rank, 3))
            };
            self.remove_piece(rook_to, color, Piece::Rook);
            self.place_piece(rook_from, color, Piece::Rook);
        }

        if mv.is_en_passant() {
            let captured_sq = Square::new(from.rank(), to.file());
            self.place_piece(captured_sq, opponent, Piece::Pawn);
        } else if let Some(captured) = undo.captured {
            self.place_piece(to, opponent, captured);
        }

        self.castling = undo.previous_castling;
        self.en_passant = undo.previous_en_passant;
        self.halfmove_clock = undo.previous_halfmove_clock;
        self.hash = undo.previous_hash;
    }

    /// Apply a null move: flip the side to move and clear en passant,
    /// nothing else changes. Used by null-move pruning in the search.
    pub fn make_null_move(&mut self) -> NullUndoInfo {
        let undo = NullUndoInfo {
            previous_en_passant: self.en_passant,
            previous_hash: self.hash,
            previous_halfmove_clock: self.halfmove_clock,
        };
        if let Some(ep) = self.en_passant {
            self.hash ^= zobrist::en_passant_key(ep.file());
        }
        self.en_passant = None;
        self.halfmove_clock += 1;
        self.side_to_move = self.side_to_move.opponent();
        self.hash ^= zobrist::side_to_move_key();
        self.hash_history.push(self.hash);
        undo
    }

    pub fn unmake_null_move(&mut self, undo: NullUndoInfo) {
        self.hash_history.pop();
        self.side_to_move = self.side_to_move.opponent();
        self.en_passant = undo.previous_en_passant;
        self.halfmove_clock = undo.previous_halfmove_clock;
        self.hash = undo.previous_hash;
    }

    fn update_castling_rights(&mut self, from: Square, to: Square, moved: Piece) {
        if moved == Piece::King {
            let (k, q) = match self.side_to_move {
                Color::White => (CASTLE_WHITE_K, CASTLE_WHITE_Q),
                Color::Black => (CASTLE_BLACK_K, CASTLE_BLACK_Q),
            };
            self.revoke_castling_bit(k);
            self.revoke_castling_bit(q);
            return;
        }
        self.revoke_castling_bit(Board::castle_corner_rights(from));
        self.revoke_castling_bit(Board::castle_corner_rights(to));
    }

    fn revoke_castling_bit(&mut self, bit: u8) {
        if bit != 0 && self.castling.as_u8() & bit != 0 {
            self.hash ^= castling_bit_key(bit);
            self.castling = CastlingRights::from_u8(self.castling.as_u8() & !bit);
        }
    }
}

fn castling_bit_key(bit: u8) -> u64 {
    zobrist::castling_key(bit.trailing_zeros() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    #[test]
    fn make_unmake_roundtrips_hash_and_position() {
        let mut board = Board::new();
        let original = board.clone();
        let mv = board.parse_move("e2e4").unwrap();
        let undo = board.make_move(mv);
        assert_ne!(board.hash(), original.hash());
        board.unmake_move(mv, undo);
        assert_eq!(board.hash(), original.hash());
        assert_eq!(board.hash(), board.compute_hash());
    }

    #[test]
    fn en_passant_capture_removes_captured_pawn() {
        let mut board = Board::new();
        for uci in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            let mv = board.parse_move(uci).unwrap();
            board.make_move(mv);
        }
        assert_eq!(board.en_passant_target(), Some(Square::new(5, 3)));
        let mv = board.parse_move("e5d6").unwrap();
        assert!(mv.is_en_passant());
        board.make_move(mv);
        assert!(board.piece_at(Square::new(4, 3)).is_none());
        assert_eq!(board.piece_at(Square::new(5, 3)), Some((Color::White, Piece::Pawn)));
    }

    #[test]
    fn castling_moves_both_king_and_rook() {
        let mut board = Board::new();
        for uci in ["g1f3", "g8f6", "g2g3", "g7g6", "f1g2", "f8g7"] {
            let mv = board.parse_move(uci).unwrap();
            board.make_move(mv);
        }
        let mv = board.parse_move("e1g1").unwrap();
        assert!(mv.is_castle_kingside());
        board.make_move(mv);
        assert_eq!(board.piece_at(Square::new(0, 6)), Some((Color::White, Piece::King)));
        assert_eq!(board.piece_at(Square::new(0, 5)), Some((Color::White, Piece::Rook)));
        assert!(!board.castling_rights().has(Color::White, true));
    }

    #[test]
    fn rook_move_revokes_only_that_corner() {
        let mut board = Board::new();
        assert!(
            board.parse_move("a1a2").is_err(),
            "blocked by the a2 pawn at the start position"
        );
        for uci in ["a2a4", "a7a5", "a1a3"] {
            let mv = board.parse_move(uci).unwrap();
            board.make_move(mv);
        }
        assert!(!board.castling_rights().has(Color::White, false));
        assert!(board.castling_rights().has(Color::White, true));
    }

    #[test]
    fn null_move_flips_side_and_restores_on_unmake() {
        let mut board = Board::new();
        let original_hash = board.hash();
        let undo = board.make_null_move();
        assert_eq!(board.side_to_move(), Color::Black);
        board.unmake_null_move(undo);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.hash(), original_hash);
    }
}
