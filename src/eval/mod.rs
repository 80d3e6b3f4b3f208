//! Static evaluation: material plus piece-square tables, mobility, pawn
//! structure, material imbalance, king safety, minor-piece placement, rook
//! placement, cross-piece threats, and space, combined with a tapered
//! midgame/endgame blend driven by remaining material ("phase"). A few
//! known drawn material configurations are special-cased to zero, a few
//! known won ones (lone king against decisive material) are special-cased
//! to a king-driving formula, and opposite-colored-bishop endgames have
//! their endgame term scaled down rather than trusting the linear blend.

mod features;
mod params;
mod pst;

pub use params::EvalParams;

use crate::board::Board;
use crate::types::{Bitboard, Color, Piece, Square, ALL_PIECES};

/// Per-feature contribution, recorded only when a debug hook asks for
/// it, an "explain the score" debugging aid.
#[derive(Clone, Debug, Default)]
pub struct EvalBreakdown {
    pub material: i32,
    pub piece_square: i32,
    pub material_imbalance: i32,
    pub mobility: i32,
    pub pawn_structure: i32,
    pub bishop_pair: i32,
    pub king_safety: i32,
    pub king_danger: i32,
    pub minor_pieces: i32,
    pub rook_placement: i32,
    pub threats: i32,
    pub space: i32,
    pub tempo: i32,
    pub phase: i32,
    pub total: i32,
}

/// Evaluate `board` from the side-to-move's perspective, in centipawns.
/// Positive means the side to move is better.
#[must_use]
pub fn evaluate(board: &Board, params: &EvalParams) -> i32 {
    let white = evaluate_white_pov(board, params, None);
    match board.side_to_move() {
        Color::White => white,
        Color::Black => -white,
    }
}

/// Evaluate from the side-to-move's perspective, also returning the full
/// per-feature breakdown (White's point of view, pre-negation), for
/// `debug eval` / `uci` diagnostics.
#[must_use]
pub fn evaluate_with_breakdown(board: &Board, params: &EvalParams) -> (i32, EvalBreakdown) {
    let mut breakdown = EvalBreakdown::default();
    let white = evaluate_white_pov(board, params, Some(&mut breakdown));
    let score = match board.side_to_move() {
        Color::White => white,
        Color::Black => -white,
    };
    (score, breakdown)
}

fn evaluate_white_pov(board: &Board, params: &EvalParams, mut breakdown: Option<&mut EvalBreakdown>) -> i32 {
    if let Some(known) = known_theoretical_draw(board) {
        return known;
    }
    if let Some(known) = known_endgame_override(board) {
        return known;
    }

    let occ = board.all_occupancy();
    let mut material_mg = 0;
    let mut material_eg = 0;
    let mut pst_mg = 0;
    let mut pst_eg = 0;
    let mut phase = 0;

    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        for piece in ALL_PIECES {
            for sq in board.pieces_of(color, piece).iter() {
                material_mg += sign * piece.value();
                material_eg += sign * piece.value();
                pst_mg += sign * pst::pst_value(piece, color, sq, true);
                pst_eg += sign * pst::pst_value(piece, color, sq, false);
                phase += pst::phase_weight(piece);
            }
        }
    }
    phase = phase.min(pst::MAX_PHASE);

    macro_rules! diff_pair {
        ($f:path) => {{
            let (w_mg, w_eg) = $f(board, Color::White, params);
            let (b_mg, b_eg) = $f(board, Color::Black, params);
            (w_mg - b_mg, w_eg - b_eg)
        }};
    }

    let (imbalance_mg, imbalance_eg) = diff_pair!(features::material_imbalance);
    let (mobility_mg, mobility_eg) = {
        let (w_mg, w_eg) = features::mobility(board, Color::White, occ, params);
        let (b_mg, b_eg) = features::mobility(board, Color::Black, occ, params);
        (w_mg - b_mg, w_eg - b_eg)
    };
    let (pawn_mg, pawn_eg) = diff_pair!(features::pawn_structure);
    let (bishop_pair_mg, bishop_pair_eg) = diff_pair!(features::bishop_pair);
    let (king_safety_mg, king_safety_eg) = diff_pair!(features::king_safety);
    let (king_danger_mg, king_danger_eg) = diff_pair!(features::king_danger);
    let (minor_mg, minor_eg) = diff_pair!(features::minor_pieces);
    let (rook_mg, rook_eg) = diff_pair!(features::rook_placement);
    let (threats_mg, threats_eg) = diff_pair!(features::threats);
    let (space_mg, space_eg) = diff_pair!(features::space);

    let tempo_mg = if board.side_to_move() == Color::White { params.tempo_mg } else { -params.tempo_mg };
    let tempo_eg = if board.side_to_move() == Color::White { params.tempo_eg } else { -params.tempo_eg };

    let mg_total = material_mg
        + pst_mg
        + imbalance_mg
        + mobility_mg
        + pawn_mg
        + bishop_pair_mg
        + king_safety_mg
        + king_danger_mg
        + minor_mg
        + rook_mg
        + threats_mg
        + space_mg
        + tempo_mg;
    let eg_total = material_eg
        + pst_eg
        + imbalance_eg
        + mobility_eg
        + pawn_eg
        + bishop_pair_eg
        + king_safety_eg
        + king_danger_eg
        + minor_eg
        + rook_eg
        + threats_eg
        + space_eg
        + tempo_eg;
    let eg_total = scale_endgame(board, eg_total, params);

    let total = taper(mg_total, eg_total, phase);

    if let Some(b) = breakdown.as_deref_mut() {
        b.material = material_mg;
        b.piece_square = pst_mg;
        b.material_imbalance = imbalance_mg;
        b.mobility = mobility_mg;
        b.pawn_structure = pawn_mg;
        b.bishop_pair = bishop_pair_mg;
        b.king_safety = king_safety_mg;
        b.king_danger = king_danger_mg;
        b.minor_pieces = minor_mg;
        b.rook_placement = rook_mg;
        b.threats = threats_mg;
        b.space = space_mg;
        b.tempo = tempo_mg;
        b.phase = phase;
        b.total = total;
    }

    total
}

fn taper(mg: i32, eg: i32, phase: i32) -> i32 {
    (mg * phase + eg * (pst::MAX_PHASE - phase)) / pst::MAX_PHASE
}

/// A handful of material configurations that are theoretically drawn
/// regardless of piece placement: KvK, KvK+minor, same-colored-bishop
/// KB vs KB.
fn known_theoretical_draw(board: &Board) -> Option<i32> {
    if board.is_insufficient_material() {
        return Some(0);
    }
    None
}

/// When one side has nothing but a bare king and the other has enough
/// material to mate, push the lone king toward a corner and bring the
/// winning king closer, rather than trusting piece-square tables tuned
/// for the middlegame to find the technique on their own.
fn known_endgame_override(board: &Board) -> Option<i32> {
    let white_bare = is_bare_king(board, Color::White);
    let black_bare = is_bare_king(board, Color::Black);
    if white_bare == black_bare {
        return None;
    }
    let (winning, losing) = if black_bare { (Color::White, Color::Black) } else { (Color::Black, Color::White) };

    let mut material = 0;
    for piece in [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        material += board.pieces_of(winning, piece).popcount() as i32 * piece.value();
    }

    let losing_king = board.king_square(losing);
    let winning_king = board.king_square(winning);
    let corner_dist = distance_to_nearest_corner(losing_king);
    let king_dist = winning_king.king_distance(losing_king);
    let score = material + (14 - corner_dist) * 10 + (6 - king_dist.min(6)) * 4;
    Some(if winning == Color::White { score } else { -score })
}

fn is_bare_king(board: &Board, color: Color) -> bool {
    [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .into_iter()
        .all(|p| board.pieces_of(color, p).is_empty())
}

fn distance_to_nearest_corner(sq: Square) -> i32 {
    [Square::new(0, 0), Square::new(0, 7), Square::new(7, 0), Square::new(7, 7)]
        .into_iter()
        .map(|corner| sq.king_distance(corner))
        .min()
        .expect("corner list is non-empty")
}

/// Opposite-colored-bishop endgames are notoriously drawish even a pawn or
/// two up: when the only minors left are bishops of opposite color, scale
/// the endgame term down instead of letting it carry full weight.
fn scale_endgame(board: &Board, eg_total: i32, params: &EvalParams) -> i32 {
    let white_bishops = board.pieces_of(Color::White, Piece::Bishop);
    let black_bishops = board.pieces_of(Color::Black, Piece::Bishop);
    if !white_bishops.is_single() || !black_bishops.is_single() {
        return eg_total;
    }
    let other_minors_or_majors = [Piece::Knight, Piece::Rook, Piece::Queen]
        .into_iter()
        .any(|p| !board.pieces_of(Color::White, p).is_empty() || !board.pieces_of(Color::Black, p).is_empty());
    if other_minors_or_majors {
        return eg_total;
    }
    let white_sq = white_bishops.lsb_square().expect("checked is_single");
    let black_sq = black_bishops.lsb_square().expect("checked is_single");
    if square_color(white_sq) == square_color(black_sq) {
        return eg_total;
    }
    (eg_total * params.opposite_bishop_scale_num) / 64
}

fn square_color(sq: Square) -> bool {
    Bitboard::from_square(sq).intersects(Bitboard::LIGHT_SQUARES)
}
