//! Positional evaluation features beyond material and piece-square tables:
//! mobility, pawn structure, material imbalance, king safety, minor-piece
//! placement, rook placement, and cross-piece threats. Each function
//! returns a midgame/endgame pair of centipawn scores from White's
//! perspective; `Eval::evaluate` tapers and sums them.

use crate::board::Board;
use crate::magic;
use crate::types::{Bitboard, Color, Piece, Square};

use super::params::EvalParams;

/// `(midgame, endgame)` centipawn pair.
pub(crate) type Pair = (i32, i32);

pub(crate) fn mobility(board: &Board, color: Color, occ: Bitboard, params: &EvalParams) -> Pair {
    let mut mg = 0;
    let mut eg = 0;
    let own = board.occupancy(color);
    for (piece, attacks_fn) in mobility_pieces() {
        for sq in board.pieces_of(color, piece).iter() {
            let attacks = attacks_fn(sq, occ) & !own;
            let count = attacks.popcount() as i32;
            mg += count * params.mobility_mg[piece.index()];
            eg += count * params.mobility_eg[piece.index()];
        }
    }
    (mg, eg)
}

/// Pawns score via PST and pawn-structure terms, not raw square-count mobility.
fn mobility_pieces() -> [(Piece, fn(Square, Bitboard) -> Bitboard); 4] {
    [
        (Piece::Knight, |sq, _| magic::knight_attacks(sq)),
        (Piece::Bishop, magic::bishop_attacks),
        (Piece::Rook, magic::rook_attacks),
        (Piece::Queen, magic::queen_attacks),
    ]
}

pub(crate) fn bishop_pair(board: &Board, color: Color, params: &EvalParams) -> Pair {
    if board.pieces_of(color, Piece::Bishop).popcount() >= 2 {
        (params.bishop_pair_mg, params.bishop_pair_eg)
    } else {
        (0, 0)
    }
}

/// Knight/bishop/rook/queen count adjustments that don't fit a flat
/// material value: knights lose value as pawns come off, bishops gain it;
/// a second knight or rook is worth a little less than the first; a lone
/// queen is a slightly worse trade than two rooks.
pub(crate) fn material_imbalance(board: &Board, color: Color, params: &EvalParams) -> Pair {
    let enemy = color.opponent();
    let knights = board.pieces_of(color, Piece::Knight).popcount() as i32;
    let bishops = board.pieces_of(color, Piece::Bishop).popcount() as i32;
    let rooks = board.pieces_of(color, Piece::Rook).popcount() as i32;
    let queens = board.pieces_of(color, Piece::Queen).popcount() as i32;
    let own_pawns = board.pieces_of(color, Piece::Pawn).popcount() as i32;
    let enemy_rooks = board.pieces_of(enemy, Piece::Rook).popcount() as i32;
    let enemy_queens = board.pieces_of(enemy, Piece::Queen).popcount() as i32;

    let mut mg = 0;
    let mut eg = 0;

    if knights >= 2 {
        mg += params.knight_pair_penalty_mg;
        eg += params.knight_pair_penalty_eg;
    }
    if rooks >= 2 {
        mg += params.rook_pair_penalty_mg;
        eg += params.rook_pair_penalty_eg;
    }

    const NEUTRAL_PAWN_COUNT: i32 = 5;
    mg += knights * params.knight_pawn_adj_mg * (own_pawns - NEUTRAL_PAWN_COUNT);
    mg += bishops * params.bishop_pawn_adj_mg * (NEUTRAL_PAWN_COUNT - own_pawns);

    if queens >= 1 && enemy_rooks >= 2 && enemy_queens == 0 {
        mg += params.queen_vs_rook_pair_mg;
    }

    (mg, eg)
}

/// Doubled, isolated, backward, phalanx, connected, and passed pawns.
pub(crate) fn pawn_structure(board: &Board, color: Color, params: &EvalParams) -> Pair {
    let mut mg = 0;
    let mut eg = 0;
    let own_pawns = board.pieces_of(color, Piece::Pawn);
    let enemy_pawns = board.pieces_of(color.opponent(), Piece::Pawn);

    for file in 0..8 {
        let file_mask = Bitboard::file_mask(file);
        let count = (own_pawns & file_mask).popcount();
        if count >= 2 {
            mg += params.doubled_pawn_mg * (count as i32 - 1);
            eg += params.doubled_pawn_eg * (count as i32 - 1);
        }
    }

    for sq in own_pawns.iter() {
        let file = sq.file();
        let rank_idx = oriented_rank(sq, color);
        let adjacent = adjacent_files_mask(file);

        let isolated = (own_pawns & adjacent).is_empty();
        if isolated {
            mg += params.isolated_pawn_mg;
            eg += params.isolated_pawn_eg;
        } else if is_backward(sq, color, own_pawns, enemy_pawns) {
            mg += params.backward_pawn_mg;
            eg += params.backward_pawn_eg;
        }

        let phalanx = !(own_pawns & adjacent & Bitboard::rank_mask(sq.rank())).is_empty();
        if phalanx {
            mg += params.phalanx_pawn_mg[rank_idx];
            eg += params.phalanx_pawn_eg[rank_idx];
        }
        if is_defended_by_pawn(sq, color, own_pawns) {
            mg += params.connected_pawn_mg[rank_idx];
            eg += params.connected_pawn_eg[rank_idx];
        }

        if is_passed(sq, color, enemy_pawns) {
            mg += params.passed_pawn_mg[rank_idx];
            eg += params.passed_pawn_eg[rank_idx];
            if is_defended_by_pawn(sq, color, own_pawns) {
                mg += params.passed_pawn_defended_mg;
                eg += params.passed_pawn_defended_eg;
            }
            if is_unstoppable(board, sq, color) {
                eg += params.passed_pawn_unstoppable_eg;
            }
        }
    }
    (mg, eg)
}

fn oriented_rank(sq: Square, color: Color) -> usize {
    if color == Color::White {
        sq.rank()
    } else {
        7 - sq.rank()
    }
}

fn adjacent_files_mask(file: usize) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    if file > 0 {
        mask |= Bitboard::file_mask(file - 1);
    }
    if file < 7 {
        mask |= Bitboard::file_mask(file + 1);
    }
    mask
}

fn is_passed(sq: Square, color: Color, enemy_pawns: Bitboard) -> bool {
    let file = sq.file();
    let rank = sq.rank();
    let span = adjacent_files_mask(file) | Bitboard::file_mask(file);
    let ahead = match color {
        Color::White => (rank + 1..8).fold(Bitboard::EMPTY, |acc, r| acc | Bitboard::rank_mask(r)),
        Color::Black => (0..rank).fold(Bitboard::EMPTY, |acc, r| acc | Bitboard::rank_mask(r)),
    };
    (enemy_pawns & span & ahead).is_empty()
}

/// A pawn with no own pawn on an adjacent file at or behind it, whose
/// advance square is already covered by an enemy pawn: it can never be
/// defended by another pawn and advancing hands it to a pawn capture.
fn is_backward(sq: Square, color: Color, own_pawns: Bitboard, enemy_pawns: Bitboard) -> bool {
    let rank = sq.rank();
    let adjacent = adjacent_files_mask(sq.file());
    let support_ranks = match color {
        Color::White => (0..=rank).fold(Bitboard::EMPTY, |acc, r| acc | Bitboard::rank_mask(r)),
        Color::Black => (rank..8).fold(Bitboard::EMPTY, |acc, r| acc | Bitboard::rank_mask(r)),
    };
    if !(own_pawns & adjacent & support_ranks).is_empty() {
        return false;
    }
    let Some(stop_sq) = sq.forward(color == Color::White) else {
        return false;
    };
    !attackers_of(stop_sq, color.opponent(), enemy_pawns, color).is_empty()
}

/// Enemy pawns (of `attacker_color`, with `attacker_color != defender_color`)
/// that attack `sq`, found via the standard reversed-pawn-attack trick:
/// the squares a pawn of `defender_color` would attack from `sq` are
/// exactly the squares an `attacker_color` pawn sitting there would need
/// to come from to hit `sq`.
fn attackers_of(sq: Square, attacker_color: Color, attacker_pawns: Bitboard, defender_color: Color) -> Bitboard {
    debug_assert_eq!(attacker_color, defender_color.opponent());
    magic::pawn_attacks(sq, defender_color) & attacker_pawns
}

fn is_defended_by_pawn(sq: Square, color: Color, own_pawns: Bitboard) -> bool {
    !attackers_of(sq, color, own_pawns, color.opponent()).is_empty()
}

/// A passed pawn is unstoppable if the board has no non-king, non-pawn
/// material left for the defender and its king cannot reach the queening
/// square inside the "rule of the square" (adjusted one tempo for whoever
/// is to move).
fn is_unstoppable(board: &Board, sq: Square, color: Color) -> bool {
    let enemy = color.opponent();
    let enemy_has_pieces = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .into_iter()
        .any(|p| !board.pieces_of(enemy, p).is_empty());
    if enemy_has_pieces {
        return false;
    }
    let promo_rank = if color == Color::White { 7 } else { 0 };
    let queening_sq = Square::new(promo_rank, sq.file());
    let pawn_dist = (promo_rank as i32 - sq.rank() as i32).unsigned_abs() as i32;
    let king_dist = board.king_square(enemy).king_distance(queening_sq);
    let tempo = (board.side_to_move() != color) as i32;
    king_dist > pawn_dist + tempo
}

/// Pawn shield in front of a castled king, penalized per missing shield
/// pawn, plus a per-file pawn-storm penalty for how far enemy pawns have
/// advanced against it.
pub(crate) fn king_safety(board: &Board, color: Color, params: &EvalParams) -> Pair {
    let king_sq = board.king_square(color);
    let mut mg = 0;
    if king_sq.rank() == (if color == Color::White { 0 } else { 7 }) {
        let shield_rank = if color == Color::White { 1 } else { 6 };
        let own_pawns = board.pieces_of(color, Piece::Pawn);
        let mut shield_files = Bitboard::EMPTY;
        for f in king_sq.file().saturating_sub(1)..=(king_sq.file() + 1).min(7) {
            shield_files |= Bitboard::file_mask(f);
        }
        let shield = (own_pawns & shield_files & Bitboard::rank_mask(shield_rank)).popcount() as i32;
        let file_span = (king_sq.file() + 1).min(7) - king_sq.file().saturating_sub(1) + 1;
        mg += shield * params.king_shield_mg;
        mg += (file_span as i32 - shield) * params.missing_shield_pawn_mg;
    }
    mg += pawn_storm(board, color, params);
    mg += bishop_pressure(board, color, params);
    (mg, 0)
}

fn pawn_storm(board: &Board, color: Color, params: &EvalParams) -> i32 {
    let king_sq = board.king_square(color);
    let enemy_pawns = board.pieces_of(color.opponent(), Piece::Pawn);
    let lo = king_sq.file().saturating_sub(1);
    let hi = (king_sq.file() + 1).min(7);
    let mut mg = 0;
    for f in lo..=hi {
        let file_pawns = enemy_pawns & Bitboard::file_mask(f);
        if let Some(closest) = file_pawns.iter().map(|sq| oriented_rank(sq, color)).min() {
            mg += params.king_storm_mg[closest];
        }
    }
    mg
}

/// X-ray diagonal pressure: an enemy bishop or queen that would see the
/// king's square if its own pawns were lifted out of the way.
fn bishop_pressure(board: &Board, color: Color, params: &EvalParams) -> i32 {
    let king_sq = board.king_square(color);
    let enemy = color.opponent();
    let own_pawns = board.pieces_of(color, Piece::Pawn);
    let occ_without_own_pawns = board.all_occupancy() & !own_pawns;
    let attackers = board.pieces_of(enemy, Piece::Bishop) | board.pieces_of(enemy, Piece::Queen);
    let mut mg = 0;
    for sq in attackers.iter() {
        if magic::bishop_attacks(sq, occ_without_own_pawns).contains(king_sq) {
            mg += params.king_bishop_pressure_mg;
        }
    }
    mg
}

/// Attack-unit king safety: each enemy piece that reaches the king's zone
/// contributes its weight; with two or more attackers the danger grows
/// quadratically, plus a flat term per safe check available next move.
pub(crate) fn king_danger(board: &Board, color: Color, params: &EvalParams) -> Pair {
    let king_sq = board.king_square(color);
    let zone = king_zone(king_sq, color);
    let enemy = color.opponent();
    let occ = board.all_occupancy();

    let mut units = 0;
    let mut attacker_count = 0;
    for (piece, attacks_fn) in mobility_pieces() {
        for sq in board.pieces_of(enemy, piece).iter() {
            if attacks_fn(sq, occ).intersects(zone) {
                attacker_count += 1;
                units += params.king_attacker_weight[piece.index()];
            }
        }
    }
    units += count_safe_checks(board, color) * params.king_safe_check_weight;

    let mg = if attacker_count >= 2 {
        -(units * units) / params.king_safety_scale.max(1)
    } else {
        0
    };
    (mg, 0)
}

fn king_zone(king_sq: Square, color: Color) -> Bitboard {
    let base = magic::king_attacks(king_sq) | Bitboard::from_square(king_sq);
    match color {
        Color::White => base | base.shift_north(),
        Color::Black => base | base.shift_south(),
    }
}

/// Empty squares next to the king from which an enemy piece could check
/// it next move without our recapturing it there.
fn count_safe_checks(board: &Board, color: Color) -> i32 {
    let king_sq = board.king_square(color);
    let enemy = color.opponent();
    let occ = board.all_occupancy();
    let own_occ = board.occupancy(color);
    let rook_queens = board.pieces_of(enemy, Piece::Rook) | board.pieces_of(enemy, Piece::Queen);
    let bishop_queens = board.pieces_of(enemy, Piece::Bishop) | board.pieces_of(enemy, Piece::Queen);
    let knights = board.pieces_of(enemy, Piece::Knight);

    let mut count = 0;
    for sq in (magic::rook_attacks(king_sq, occ) & !own_occ).iter() {
        if board.piece_at(sq).is_none() && magic::rook_attacks(sq, occ).intersects(rook_queens) && !board.is_square_attacked_by(sq, color) {
            count += 1;
        }
    }
    for sq in (magic::bishop_attacks(king_sq, occ) & !own_occ).iter() {
        if board.piece_at(sq).is_none() && magic::bishop_attacks(sq, occ).intersects(bishop_queens) && !board.is_square_attacked_by(sq, color) {
            count += 1;
        }
    }
    for sq in (magic::knight_attacks(king_sq) & !own_occ).iter() {
        if board.piece_at(sq).is_none() && magic::knight_attacks(sq).intersects(knights) && !board.is_square_attacked_by(sq, color) {
            count += 1;
        }
    }
    count
}

/// Knight and bishop outposts, fianchetto setups, minors tucked near the
/// king, and bishops boxed in by their own color-bound pawns.
pub(crate) fn minor_pieces(board: &Board, color: Color, params: &EvalParams) -> Pair {
    let own_pawns = board.pieces_of(color, Piece::Pawn);
    let enemy_pawns = board.pieces_of(color.opponent(), Piece::Pawn);
    let king_sq = board.king_square(color);

    let mut mg = 0;
    let mut eg = 0;

    for sq in board.pieces_of(color, Piece::Knight).iter() {
        if is_outpost_square(sq, color, own_pawns, enemy_pawns) {
            mg += params.knight_outpost_mg;
            eg += params.knight_outpost_eg;
        }
        if sq.king_distance(king_sq) <= 2 {
            mg += params.shielded_minor_mg;
        }
    }

    for sq in board.pieces_of(color, Piece::Bishop).iter() {
        if is_outpost_square(sq, color, own_pawns, enemy_pawns) {
            mg += params.bishop_outpost_mg;
            eg += params.bishop_outpost_eg;
        }
        if sq.king_distance(king_sq) <= 2 {
            mg += params.shielded_minor_mg;
        }
        let same_color_mask = if (sq.rank() + sq.file()) % 2 == 0 { Bitboard::DARK_SQUARES } else { Bitboard::LIGHT_SQUARES };
        let same_color_pawns = (own_pawns & same_color_mask).popcount() as i32;
        if same_color_pawns >= 3 {
            let excess = same_color_pawns - 2;
            mg += params.bad_bishop_mg * excess;
            eg += params.bad_bishop_eg * excess;
        }
    }

    mg += fianchetto_bonus(board, color, params);
    (mg, eg)
}

fn is_outpost_square(sq: Square, color: Color, own_pawns: Bitboard, enemy_pawns: Bitboard) -> bool {
    let rank = sq.rank();
    let in_outpost_ranks = match color {
        Color::White => (3..=5).contains(&rank),
        Color::Black => (2..=4).contains(&rank),
    };
    if !in_outpost_ranks || !is_defended_by_pawn(sq, color, own_pawns) {
        return false;
    }
    let adjacent = adjacent_files_mask(sq.file());
    let ahead = match color {
        Color::White => (rank..8).fold(Bitboard::EMPTY, |acc, r| acc | Bitboard::rank_mask(r)),
        Color::Black => (0..=rank).fold(Bitboard::EMPTY, |acc, r| acc | Bitboard::rank_mask(r)),
    };
    (enemy_pawns & adjacent & ahead).is_empty()
}

fn fianchetto_bonus(board: &Board, color: Color, params: &EvalParams) -> i32 {
    let own_pawns = board.pieces_of(color, Piece::Pawn);
    let bishops = board.pieces_of(color, Piece::Bishop);
    let (kingside_bishop, kingside_pawn, queenside_bishop, queenside_pawn) = match color {
        Color::White => (Square::new(1, 6), Square::new(2, 6), Square::new(1, 1), Square::new(2, 1)),
        Color::Black => (Square::new(6, 6), Square::new(5, 6), Square::new(6, 1), Square::new(5, 1)),
    };
    let mut mg = 0;
    if bishops.contains(kingside_bishop) && own_pawns.contains(kingside_pawn) {
        mg += params.fianchetto_bonus_mg;
    }
    if bishops.contains(queenside_bishop) && own_pawns.contains(queenside_pawn) {
        mg += params.fianchetto_bonus_mg;
    }
    mg
}

/// Rooks get a bonus on files with no pawns of either (open) or just their
/// own (semi-open) color, and an extra bonus sitting on the 7th rank
/// against an enemy back-rank king or uncleared 7th-rank pawns.
pub(crate) fn rook_placement(board: &Board, color: Color, params: &EvalParams) -> Pair {
    let own_pawns = board.pieces_of(color, Piece::Pawn);
    let enemy_pawns = board.pieces_of(color.opponent(), Piece::Pawn);
    let seventh_rank = if color == Color::White { 6 } else { 1 };
    let enemy_back_rank = if color == Color::White { 7 } else { 0 };
    let enemy_king_on_back = board.king_square(color.opponent()).rank() == enemy_back_rank;
    let enemy_pawns_on_seventh = !(enemy_pawns & Bitboard::rank_mask(seventh_rank)).is_empty();

    let mut mg = 0;
    let mut eg = 0;
    for sq in board.pieces_of(color, Piece::Rook).iter() {
        let file_mask = Bitboard::file_mask(sq.file());
        let has_own = !(own_pawns & file_mask).is_empty();
        let has_enemy = !(enemy_pawns & file_mask).is_empty();
        if !has_own && !has_enemy {
            mg += params.rook_open_file_mg;
        } else if !has_own {
            mg += params.rook_semi_open_file_mg;
        }
        if sq.rank() == seventh_rank && (enemy_king_on_back || enemy_pawns_on_seventh) {
            mg += params.rook_seventh_rank_mg;
            eg += params.rook_seventh_rank_eg;
        }
    }
    (mg, eg)
}

/// Minors or rooks attacking higher-value enemy pieces, and enemy
/// non-pawn pieces we attack that nothing of theirs defends.
pub(crate) fn threats(board: &Board, color: Color, params: &EvalParams) -> Pair {
    let enemy = color.opponent();
    let occ = board.all_occupancy();
    let mut mg = 0;
    let mut eg = 0;

    let major_targets = board.pieces_of(enemy, Piece::Rook) | board.pieces_of(enemy, Piece::Queen);
    for sq in board.pieces_of(color, Piece::Knight).iter() {
        let n = (magic::knight_attacks(sq) & major_targets).popcount() as i32;
        mg += n * params.threat_by_minor_mg;
        eg += n * params.threat_by_minor_eg;
    }
    for sq in board.pieces_of(color, Piece::Bishop).iter() {
        let n = (magic::bishop_attacks(sq, occ) & major_targets).popcount() as i32;
        mg += n * params.threat_by_minor_mg;
        eg += n * params.threat_by_minor_eg;
    }
    for sq in board.pieces_of(color, Piece::Rook).iter() {
        let n = (magic::rook_attacks(sq, occ) & board.pieces_of(enemy, Piece::Queen)).popcount() as i32;
        mg += n * params.threat_by_rook_mg;
        eg += n * params.threat_by_rook_eg;
    }

    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        for sq in board.pieces_of(enemy, piece).iter() {
            if board.is_square_attacked_by(sq, color) && !board.is_square_attacked_by(sq, enemy) {
                mg += params.hanging_piece_mg;
                eg += params.hanging_piece_eg;
            }
        }
    }
    (mg, eg)
}

/// Safe, uncontested central squares behind a side's own pawns: a rough
/// measure of how much room the position gives it to maneuver.
pub(crate) fn space(board: &Board, color: Color, params: &EvalParams) -> Pair {
    let central_files = Bitboard::file_mask(2) | Bitboard::file_mask(3) | Bitboard::file_mask(4) | Bitboard::file_mask(5);
    let own_half = match color {
        Color::White => Bitboard::rank_mask(1) | Bitboard::rank_mask(2) | Bitboard::rank_mask(3),
        Color::Black => Bitboard::rank_mask(6) | Bitboard::rank_mask(5) | Bitboard::rank_mask(4),
    };
    let enemy_pawns = board.pieces_of(color.opponent(), Piece::Pawn);
    let mut count = 0;
    for sq in (central_files & own_half).iter() {
        if board.piece_at(sq).is_some() {
            continue;
        }
        if attackers_of(sq, color.opponent(), enemy_pawns, color).is_empty() {
            count += 1;
        }
    }
    (count * params.space_mg, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS_FEN;

    #[test]
    fn startpos_pawns_carry_no_isolated_backward_or_doubled_penalty() {
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        let params = EvalParams::default();
        let (mg, eg) = pawn_structure(&board, Color::White, &params);
        // every pawn has a same-rank neighbor, so only the phalanx bonus
        // applies here; none of the penalty terms should fire.
        assert!(mg >= 0 && eg >= 0, "got ({mg}, {eg})");
    }

    #[test]
    fn doubled_pawns_are_penalized() {
        let board = Board::from_fen("4k3/8/8/8/8/4P3/4P3/4K3 w - - 0 1").unwrap();
        let params = EvalParams::default();
        let (mg, _) = pawn_structure(&board, Color::White, &params);
        assert!(mg < 0);
    }

    #[test]
    fn open_file_rook_is_rewarded() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let params = EvalParams::default();
        let (mg, _) = rook_placement(&board, Color::White, &params);
        assert_eq!(mg, params.rook_open_file_mg);
    }

    #[test]
    fn knight_on_protected_outpost_is_rewarded() {
        let board = Board::from_fen("4k3/8/8/8/3N4/2P5/8/4K3 w - - 0 1").unwrap();
        let params = EvalParams::default();
        let (mg, _) = minor_pieces(&board, Color::White, &params);
        assert!(mg >= params.knight_outpost_mg);
    }

    #[test]
    fn backward_pawn_with_no_adjacent_support_is_penalized() {
        // b2 has a c3 neighbor but it's too far advanced to ever defend
        // it, and a4 already covers b3, so b2 can never safely step up.
        let board = Board::from_fen("4k3/8/8/8/p7/2P5/1P6/4K3 w - - 0 1").unwrap();
        let params = EvalParams::default();
        let (mg, _) = pawn_structure(&board, Color::White, &params);
        assert!(mg < 0);
    }

    #[test]
    fn knight_forking_a_rook_registers_a_threat() {
        let board = Board::from_fen("4k3/8/8/2r5/4N3/8/8/4K3 w - - 0 1").unwrap();
        let params = EvalParams::default();
        let (mg, _) = threats(&board, Color::White, &params);
        assert!(mg > 0);
    }

    #[test]
    fn hanging_enemy_rook_is_detected() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4r3/4KR2 w - - 0 1").unwrap();
        let params = EvalParams::default();
        let (mg, _) = threats(&board, Color::White, &params);
        assert!(mg > 0);
    }
}
