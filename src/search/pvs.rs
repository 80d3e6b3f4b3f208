//! Principal variation search: alpha-beta with iterative deepening,
//! null-move pruning, late-move reductions, futility pruning, razoring,
//! check extensions, and quiescence search.
//!
//! The search is expressed as `Option<i32>`, with `None` meaning "aborted
//! because the stop flag fired or the hard time budget ran out" — every
//! recursive call propagates it immediately rather than returning a score
//! that was never actually computed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::board::Board;
use crate::eval::{self, EvalParams};
use crate::ordering::{self, OrderingTables};
use crate::tablebase::{NullOracle, TablebaseOracle};
use crate::tt::{Bound, TranspositionTable, MATE_SCORE, MATE_THRESHOLD};
use crate::types::{Color, Move, MoveList, Piece};

use super::time::TimeBudget;

const MAX_PLY: usize = 128;
const NULL_MOVE_MIN_DEPTH: i32 = 3;
const NULL_MOVE_REDUCTION: i32 = 3;
const LMR_MIN_DEPTH: i32 = 3;
const LMR_MIN_MOVE_INDEX: usize = 4;
const FUTILITY_MARGIN_PER_PLY: i32 = 120;
const FUTILITY_MAX_DEPTH: i32 = 6;
const RAZOR_MARGIN: i32 = 300;
const ASPIRATION_WINDOW: i32 = 50;
const NODES_PER_TIME_CHECK: u64 = 2048;
const SINGULAR_MIN_DEPTH: i32 = 8;
const SINGULAR_TT_DEPTH_MARGIN: i32 = 3;
const SINGULAR_MARGIN: i32 = 80;
const IID_MIN_DEPTH: i32 = 6;
const IID_REDUCTION: i32 = 2;

/// Tunable search constants, kept separate from `EvalParams` since they
/// govern tree shape rather than position scoring.
#[derive(Clone, Debug)]
pub struct SearchParams {
    pub max_depth: u32,
    /// Centipawn penalty applied to draw scores, UCI's `Contempt` option.
    /// Positive values make the engine avoid draws.
    pub contempt: i32,
    /// `go searchmoves m1 m2 ...`: when present, the root move loop only
    /// considers these moves. `None` searches every legal root move.
    pub root_search_moves: Option<Vec<Move>>,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams { max_depth: 64, contempt: 0, root_search_moves: None }
    }
}

/// Shared, cross-worker state for one `go` command's Lazy-SMP
/// coordination: the transposition table, a cooperative stop flag, a
/// node counter used both for reporting and for time checks, and a
/// best-root-move summary every worker publishes to as it completes
/// iterations, so the coordinator can pick the deepest result across the
/// whole pool rather than trusting a single worker.
pub struct SharedSearchState {
    pub tt: Arc<TranspositionTable>,
    pub stop: Arc<AtomicBool>,
    pub nodes: Arc<AtomicU64>,
    /// Endgame tablebase oracle. Defaults to a no-op; set via
    /// `Engine::set_tablebase` when a real prober is plugged in.
    pub tablebase: Arc<dyn TablebaseOracle>,
    /// Packed `(depth, score, best_move)` of the deepest iteration any
    /// worker has completed so far. See `pack_root_summary`.
    pub best_root: Arc<AtomicU64>,
}

impl SharedSearchState {
    #[must_use]
    pub fn new(tt: Arc<TranspositionTable>, stop: Arc<AtomicBool>, nodes: Arc<AtomicU64>) -> Self {
        SharedSearchState { tt, stop, nodes, tablebase: Arc::new(NullOracle), best_root: Arc::new(AtomicU64::new(0)) }
    }
}

/// Packs a completed iteration's depth, score, and best move into one
/// word for lock-free cross-worker publication. Layout: bits 0-31 score
/// (as `i32` bit pattern), bits 32-47 the move's packed `u16`, bits 48-55
/// the depth (clamped to `u8`).
#[must_use]
pub fn pack_root_summary(depth: u32, score: i32, best_move: Move) -> u64 {
    let depth_bits = u64::from(depth.min(255) as u8);
    let move_bits = u64::from(best_move.as_u16());
    let score_bits = u64::from(score as u32);
    (depth_bits << 48) | (move_bits << 32) | score_bits
}

/// Inverse of `pack_root_summary`.
#[must_use]
pub fn unpack_root_summary(word: u64) -> (u32, i32, Move) {
    let depth = ((word >> 48) & 0xFF) as u32;
    let move_bits = ((word >> 32) & 0xFFFF) as u16;
    let score = (word & 0xFFFF_FFFF) as u32 as i32;
    (depth, score, Move::from_u16(move_bits))
}

/// One worker's view of a search: its own board copy (so make/unmake
/// never contends with other threads), its own killer/history tables, and
/// the shared state above.
pub struct Worker<'a> {
    board: Board,
    shared: &'a SharedSearchState,
    tables: OrderingTables,
    eval_params: EvalParams,
    search_params: SearchParams,
    start: Instant,
    hard_deadline: std::time::Duration,
    local_nodes: u64,
    root_best_move: Move,
    pv: Vec<Move>,
    last_move_played: Option<Move>,
}

/// The result of one completed (or aborted) iterative-deepening run.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

impl<'a> Worker<'a> {
    #[must_use]
    pub fn new(board: Board, shared: &'a SharedSearchState, eval_params: EvalParams, search_params: SearchParams) -> Self {
        Worker {
            board,
            shared,
            tables: OrderingTables::new(),
            eval_params,
            search_params,
            start: Instant::now(),
            hard_deadline: std::time::Duration::from_secs(3600),
            local_nodes: 0,
            root_best_move: Move::null(),
            pv: Vec::new(),
            last_move_played: None,
        }
    }

    /// Iterative deepening driver. Runs until the requested depth, the
    /// time budget, or the shared stop flag cuts it off, returning the
    /// deepest fully-completed iteration's result.
    pub fn iterative_deepening(&mut self, budget: TimeBudget, mut on_iteration: impl FnMut(&SearchResult)) -> SearchResult {
        self.hard_deadline = budget.hard;
        self.start = Instant::now();
        self.shared.tt.new_generation();

        // A fallback in case the stop flag fires before depth 1 even
        // finishes: `bestmove` must still name a legal move, never the
        // null-move placeholder.
        let root_moves = self.restrict_to_root_search_moves(self.board.generate_legal_moves());
        let first_legal_move = root_moves.iter().next().copied().unwrap_or(Move::null());
        self.root_best_move = first_legal_move;

        let mut best = SearchResult {
            best_move: first_legal_move,
            score: 0,
            depth: 0,
            nodes: 0,
            pv: Vec::new(),
        };

        let mut alpha = -MATE_SCORE;
        let mut beta = MATE_SCORE;
        let mut score = 0;

        for depth in 1..=self.search_params.max_depth {
            if self.start.elapsed() >= budget.soft && depth > 1 {
                break;
            }

            let mut window = ASPIRATION_WINDOW;
            loop {
                match self.negamax(depth as i32, alpha, beta, 0, Move::null()) {
                    None => return best,
                    Some(s) => {
                        score = s;
                        if score <= alpha {
                            alpha = (score - window).max(-MATE_SCORE);
                            window *= 2;
                        } else if score >= beta {
                            beta = (score + window).min(MATE_SCORE);
                            window *= 2;
                        } else {
                            break;
                        }
                    }
                }
                if window > MATE_SCORE * 2 {
                    alpha = -MATE_SCORE;
                    beta = MATE_SCORE;
                }
            }

            alpha = score - ASPIRATION_WINDOW;
            beta = score + ASPIRATION_WINDOW;

            self.pv = self.extract_pv(depth as usize);
            best = SearchResult {
                best_move: self.pv.first().copied().unwrap_or(self.root_best_move),
                score,
                depth,
                nodes: self.shared.nodes.load(Ordering::Relaxed),
                pv: self.pv.clone(),
            };
            self.root_best_move = best.best_move;

            let summary = pack_root_summary(depth, score, best.best_move);
            let _ = self.shared.best_root.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                let (current_depth, ..) = unpack_root_summary(current);
                (depth >= current_depth).then_some(summary)
            });

            crate::logging::debug!("iteration finished: depth {depth} score {score} best {} nodes {}", best.best_move, best.nodes);
            on_iteration(&best);

            if score.abs() > MATE_THRESHOLD {
                break;
            }
        }
        best
    }

    /// Applies `go searchmoves`: when the search is restricted to a subset
    /// of root moves, filters the generated root move list down to that
    /// subset. Returns `moves` unchanged when no restriction is set.
    fn restrict_to_root_search_moves(&self, moves: MoveList) -> MoveList {
        let Some(allowed) = self.search_params.root_search_moves.as_ref() else {
            return moves;
        };
        let mut filtered = MoveList::new();
        for mv in moves.iter() {
            if allowed.contains(mv) {
                filtered.push(*mv);
            }
        }
        filtered
    }

    fn should_stop(&self) -> bool {
        if self.shared.stop.load(Ordering::Relaxed) {
            return true;
        }
        self.local_nodes % NODES_PER_TIME_CHECK == 0 && self.start.elapsed() >= self.hard_deadline
    }

    /// Negamax-form PVS. `ply` is distance from the root, used for
    /// mate-distance scoring and killer-table indexing. `excluded` names a
    /// move that must be skipped at this node; it is non-null only for the
    /// reduced-depth verification search a singular-extension check runs,
    /// and suppresses both the TT cutoff and the TT store so that the
    /// verification doesn't pollute the real entry for this position.
    fn negamax(&mut self, depth: i32, mut alpha: i32, beta: i32, ply: u32, excluded: Move) -> Option<i32> {
        self.local_nodes += 1;
        self.shared.nodes.fetch_add(1, Ordering::Relaxed);
        if self.local_nodes % 1024 == 0 && self.should_stop() {
            return None;
        }

        if ply > 0 && (self.board.is_draw_in_search() || self.board.is_insufficient_material()) {
            return Some(-self.search_params.contempt);
        }

        if depth <= 0 {
            return self.quiescence(alpha, beta, ply);
        }

        let in_check = self.board.is_in_check(self.board.side_to_move());
        let key = self.board.hash();
        let is_pv = beta - alpha > 1;
        let excluding = !excluded.is_null();

        let mut tt_move = Move::null();
        let mut tt_entry = None;
        if !excluding {
            if let Some(entry) = self.shared.tt.probe(key, ply) {
                tt_move = entry.best_move;
                if !is_pv && i32::from(entry.depth) >= depth {
                    match entry.bound {
                        Bound::Exact => return Some(entry.score),
                        Bound::LowerBound if entry.score >= beta => return Some(entry.score),
                        Bound::UpperBound if entry.score <= alpha => return Some(entry.score),
                        _ => {}
                    }
                }
                tt_entry = Some(entry);
            }
        }

        if ply > 0 && self.board.total_piece_count() <= self.shared.tablebase.max_pieces() {
            if let Some(result) = self.shared.tablebase.probe_wdl(&self.board) {
                return Some(result.to_score(ply));
            }
        }

        let static_eval = eval::evaluate(&self.board, &self.eval_params);

        if !in_check && !is_pv && depth <= FUTILITY_MAX_DEPTH {
            let margin = FUTILITY_MARGIN_PER_PLY * depth;
            if static_eval - margin >= beta {
                return Some(static_eval - margin);
            }
            if depth == 1 && static_eval + RAZOR_MARGIN < alpha {
                return self.quiescence(alpha, beta, ply);
            }
        }

        if !in_check
            && !is_pv
            && depth >= NULL_MOVE_MIN_DEPTH
            && beta.abs() < MATE_THRESHOLD
            && self.has_non_pawn_material(self.board.side_to_move())
        {
            let undo = self.board.make_null_move();
            let score = -self.negamax(depth - 1 - NULL_MOVE_REDUCTION, -beta, -beta + 1, ply + 1, Move::null())?;
            self.board.unmake_null_move(undo);
            if score >= beta {
                return Some(beta);
            }
        }

        // Internal iterative deepening: no TT move to order on at a node
        // deep enough to be worth it, so spend a reduced-depth search
        // finding one before committing to full-depth move ordering.
        if !excluding && tt_move.is_null() && depth >= IID_MIN_DEPTH {
            self.negamax(depth - IID_REDUCTION, alpha, beta, ply, Move::null())?;
            if let Some(entry) = self.shared.tt.probe(key, ply) {
                tt_move = entry.best_move;
                tt_entry = Some(entry);
            }
        }

        let moves = if ply == 0 { self.restrict_to_root_search_moves(self.board.generate_legal_moves()) } else { self.board.generate_legal_moves() };
        if moves.is_empty() {
            return Some(if in_check { -(MATE_SCORE - ply as i32) } else { -self.search_params.contempt });
        }

        let previous_move = if ply > 0 { self.last_move_played.unwrap_or(Move::null()) } else { Move::null() };
        let mut scored = ordering::score_moves(&self.board, &moves, &self.tables, tt_move, ply as usize, previous_move);

        let mut best_score = -MATE_SCORE;
        let mut best_move = Move::null();
        let mut move_index = 0usize;
        let color_idx = self.board.side_to_move().index();

        for i in 0..scored.len() {
            let Some(scored_move) = scored.pick_best(i) else { break };
            let mv = scored_move.mv;
            if mv == excluded {
                continue;
            }
            let gives_check = self.move_gives_check(mv);
            let mut extension = i32::from(gives_check);

            // Singular extension: the TT move is the only one that avoids
            // a big drop in score, so the position deserves a deeper look
            // along that line rather than the usual one ply.
            if !excluding
                && extension == 0
                && mv == tt_move
                && depth >= SINGULAR_MIN_DEPTH
                && ply > 0
            {
                if let Some(entry) = tt_entry {
                    let depth_ok = i32::from(entry.depth) >= depth - SINGULAR_TT_DEPTH_MARGIN;
                    let bound_ok = matches!(entry.bound, Bound::Exact | Bound::LowerBound);
                    if depth_ok && bound_ok && entry.score.abs() < MATE_THRESHOLD {
                        let singular_beta = entry.score - SINGULAR_MARGIN;
                        let singular_depth = (depth - 1) / 2;
                        match self.negamax(singular_depth, singular_beta - 1, singular_beta, ply, mv) {
                            None => return None,
                            Some(s) if s < singular_beta => extension = 1,
                            _ => {}
                        }
                    }
                }
            }

            let undo = self.board.make_move(mv);
            self.last_move_played = Some(mv);

            let mut reduction = 0;
            if !in_check
                && !gives_check
                && mv.is_quiet()
                && depth >= LMR_MIN_DEPTH
                && move_index >= LMR_MIN_MOVE_INDEX
            {
                reduction = 1 + i32::from(move_index > 10);
            }

            let score = if move_index == 0 {
                match -self.negamax(depth - 1 + extension, -beta, -alpha, ply + 1, Move::null()) {
                    None => {
                        self.board.unmake_move(mv, undo);
                        return None;
                    }
                    Some(s) => s,
                }
            } else {
                let reduced = match -self.negamax(depth - 1 + extension - reduction, -alpha - 1, -alpha, ply + 1, Move::null()) {
                    None => {
                        self.board.unmake_move(mv, undo);
                        return None;
                    }
                    Some(s) => s,
                };
                if reduced > alpha && (reduction > 0 || reduced < beta) {
                    match -self.negamax(depth - 1 + extension, -beta, -alpha, ply + 1, Move::null()) {
                        None => {
                            self.board.unmake_move(mv, undo);
                            return None;
                        }
                        Some(s) => s,
                    }
                } else {
                    reduced
                }
            };

            self.board.unmake_move(mv, undo);

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                if mv.is_quiet() {
                    self.tables.record_killer(ply as usize, mv);
                    self.tables.record_history(color_idx, mv, depth);
                    self.tables.record_counter_move(previous_move, mv);
                }
                break;
            }
            move_index += 1;
        }

        if !excluding {
            let bound = if best_score >= beta {
                Bound::LowerBound
            } else if best_move.is_null() {
                Bound::UpperBound
            } else {
                Bound::Exact
            };
            self.shared.tt.store(key, depth.clamp(0, i8::MAX as i32) as i8, best_score, bound, best_move, ply);
        }

        Some(best_score)
    }

    /// Capture-only search extending the horizon until the position is
    /// "quiet", with a stand-pat cutoff and SEE pruning of clearly losing
    /// captures — except when in check, where stand-pat would ignore the
    /// threat entirely: every legal evasion (quiet or not) is searched
    /// instead, exactly like a normal check-evasion node.
    fn quiescence(&mut self, mut alpha: i32, beta: i32, ply: u32) -> Option<i32> {
        self.local_nodes += 1;
        self.shared.nodes.fetch_add(1, Ordering::Relaxed);
        if self.local_nodes % 1024 == 0 && self.should_stop() {
            return None;
        }

        if ply as usize >= MAX_PLY {
            return Some(eval::evaluate(&self.board, &self.eval_params));
        }

        let in_check = self.board.is_in_check(self.board.side_to_move());

        let mut best = -(MATE_SCORE - ply as i32);
        if !in_check {
            let stand_pat = eval::evaluate(&self.board, &self.eval_params);
            if stand_pat >= beta {
                return Some(stand_pat);
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
            best = stand_pat;
        }

        let moves = self.board.generate_legal_moves();
        if in_check && moves.is_empty() {
            return Some(-(MATE_SCORE - ply as i32));
        }
        let mut scored = ordering::score_moves(&self.board, &moves, &self.tables, Move::null(), ply as usize, Move::null());

        for i in 0..scored.len() {
            let Some(scored_move) = scored.pick_best(i) else { break };
            let mv = scored_move.mv;
            if !in_check {
                if !mv.is_tactical() {
                    continue;
                }
                if mv.is_capture() && self.board.see(mv) < 0 {
                    continue;
                }
            }
            let undo = self.board.make_move(mv);
            let score = -self.quiescence(-beta, -alpha, ply + 1)?;
            self.board.unmake_move(mv, undo);

            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        Some(best)
    }

    fn has_non_pawn_material(&self, color: Color) -> bool {
        for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            if !self.board.pieces_of(color, piece).is_empty() {
                return true;
            }
        }
        false
    }

    fn move_gives_check(&mut self, mv: Move) -> bool {
        let undo = self.board.make_move(mv);
        let gives_check = self.board.is_in_check(self.board.side_to_move());
        self.board.unmake_move(mv, undo);
        gives_check
    }

    /// Reconstruct the principal variation by chasing TT exact entries
    /// from the root, up to `max_len` plies. Simpler than a triangular PV
    /// array and correct as long as the TT isn't overwritten mid-chase.
    fn extract_pv(&mut self, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max_len);
        let mut undos = Vec::with_capacity(max_len);
        for ply in 0..max_len {
            let Some(entry) = self.shared.tt.probe(self.board.hash(), ply as u32) else { break };
            if entry.best_move.is_null() {
                break;
            }
            let legal = self.board.generate_legal_moves();
            if !legal.contains(entry.best_move) {
                break;
            }
            pv.push(entry.best_move);
            undos.push((entry.best_move, self.board.make_move(entry.best_move)));
        }
        for (mv, undo) in undos.into_iter().rev() {
            self.board.unmake_move(mv, undo);
        }
        pv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS_FEN;
    use std::sync::atomic::{AtomicBool, AtomicU64};

    fn shared() -> SharedSearchState {
        SharedSearchState::new(
            Arc::new(TranspositionTable::new(1)),
            Arc::new(AtomicBool::new(false)),
            Arc::new(AtomicU64::new(0)),
        )
    }

    #[test]
    fn root_summary_roundtrips_through_packing() {
        let mv = Move::quiet(crate::types::Square::from_index(12), crate::types::Square::from_index(28));
        let packed = pack_root_summary(17, -345, mv);
        let (depth, score, best_move) = unpack_root_summary(packed);
        assert_eq!(depth, 17);
        assert_eq!(score, -345);
        assert_eq!(best_move, mv);
    }

    #[test]
    fn iterative_deepening_publishes_each_completed_depth_to_the_shared_summary() {
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        let shared = shared();
        let mut worker = Worker::new(board, &shared, EvalParams::default(), SearchParams { max_depth: 3, ..Default::default() });
        let budget = TimeBudget::unbounded();
        let result = worker.iterative_deepening(budget, |_| {});
        let (depth, _, best_move) = unpack_root_summary(shared.best_root.load(Ordering::Relaxed));
        assert_eq!(depth, result.depth);
        assert_eq!(best_move, result.best_move);
    }

    #[test]
    fn finds_mate_in_one() {
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
        let shared = shared();
        let mut worker = Worker::new(board, &shared, EvalParams::default(), SearchParams { max_depth: 4, ..Default::default() });
        let budget = TimeBudget::unbounded();
        let result = worker.iterative_deepening(budget, |_| {});
        assert!(result.score > MATE_THRESHOLD);
        assert_eq!(result.best_move.to_string(), "a1a8");
    }

    #[test]
    fn does_not_blunder_a_free_queen() {
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        let shared = shared();
        let mut worker = Worker::new(board, &shared, EvalParams::default(), SearchParams { max_depth: 3, ..Default::default() });
        let budget = TimeBudget::unbounded();
        let result = worker.iterative_deepening(budget, |_| {});
        assert!(!result.best_move.is_null());
    }

    #[test]
    fn respects_a_stopped_flag() {
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        let shared = shared();
        shared.stop.store(true, Ordering::Relaxed);
        let mut worker = Worker::new(board, &shared, EvalParams::default(), SearchParams { max_depth: 20, ..Default::default() });
        let budget = TimeBudget::unbounded();
        let result = worker.iterative_deepening(budget, |_| {});
        assert_eq!(result.depth, 0);
        assert!(!result.best_move.is_null(), "a stopped search must still report a legal move, not the null-move sentinel");
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        assert!(board.generate_legal_moves().contains(result.best_move));
    }
}
