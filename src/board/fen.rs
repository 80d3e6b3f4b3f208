//! FEN (Forsyth-Edwards Notation) parsing and emission.

use crate::types::{CastlingRights, Color, Piece, Square};

use super::error::FenError;
use super::state::Board;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a position from FEN. All six fields are required; a malformed
    /// FEN is a protocol error the caller recovers from.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut board = Board::empty();
        parse_piece_placement(&mut board, parts[0])?;

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        board.castling = parse_castling(parts[2])?;
        board.en_passant = parse_en_passant(parts[3])?;

        board.halfmove_clock = if let Some(&s) = parts.get(4) {
            s.parse()
                .map_err(|_| FenError::InvalidHalfmoveClock { found: s.to_string() })?
        } else {
            0
        };
        board.fullmove_number = if let Some(&s) = parts.get(5) {
            s.parse()
                .map_err(|_| FenError::InvalidFullmoveNumber { found: s.to_string() })?
        } else {
            1
        };

        board.hash = board.compute_hash();
        board.hash_history.clear();
        board.hash_history.push(board.hash);
        Ok(board)
    }

    /// Render this position as FEN, inverse of `from_fen`.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(64);
        for rank in (0..8).rev() {
            let mut empty_run = 0u32;
            for file in 0..8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            out.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        out.push(piece.to_fen_char(color));
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                out.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(if self.side_to_move == Color::White { 'w' } else { 'b' });

        out.push(' ');
        let mut any_castling = false;
        for (has, ch) in [
            (self.castling.has(Color::White, true), 'K'),
            (self.castling.has(Color::White, false), 'Q'),
            (self.castling.has(Color::Black, true), 'k'),
            (self.castling.has(Color::Black, false), 'q'),
        ] {
            if has {
                out.push(ch);
                any_castling = true;
            }
        }
        if !any_castling {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push(' ');
        out.push_str(&self.halfmove_clock.to_string());
        out.push(' ');
        out.push_str(&self.fullmove_number.to_string());
        out
    }
}

fn parse_piece_placement(board: &mut Board, field: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRank { rank: ranks.len() });
    }
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                if file > 8 {
                    return Err(FenError::TooManyFiles { rank, files: file });
                }
                continue;
            }
            if file >= 8 {
                return Err(FenError::TooManyFiles { rank, files: file + 1 });
            }
            let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
            let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            board.place_piece(Square::new(rank, file), color, piece);
            file += 1;
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    if field == "-" {
        return Ok(CastlingRights::none());
    }
    let mut rights = CastlingRights::none();
    for c in field.chars() {
        match c {
            'K' => rights.set(Color::White, true),
            'Q' => rights.set(Color::White, false),
            'k' => rights.set(Color::Black, true),
            'q' => rights.set(Color::Black, false),
            _ => return Err(FenError::InvalidCastling { char: c }),
        }
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    field
        .parse::<Square>()
        .map(Some)
        .map_err(|_| FenError::InvalidEnPassant {
            found: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_roundtrips() {
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        assert_eq!(board.to_fen(), STARTPOS_FEN);
        assert_eq!(board.hash(), Board::new().hash());
    }

    #[test]
    fn kiwipete_parses_with_all_castling_rights_and_ep() {
        let kiwipete = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let board = Board::from_fen(kiwipete).unwrap();
        assert!(board.castling_rights().has(Color::White, true));
        assert!(board.castling_rights().has(Color::Black, false));
        assert_eq!(board.to_fen(), kiwipete);
    }

    #[test]
    fn en_passant_square_parses() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.en_passant_target(), Some(Square::new(5, 4)));
    }

    #[test]
    fn too_few_parts_is_rejected() {
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(FenError::TooFewParts { found: 1 })
        );
    }

    #[test]
    fn bad_piece_char_is_rejected() {
        let bad = "rnbqkbnx/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            Board::from_fen(bad),
            Err(FenError::InvalidPiece { char: 'x' })
        ));
    }
}
