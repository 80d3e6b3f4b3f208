//! Search module: turns a position plus a `go` command's limits into a
//! best move, via iterative deepening PVS and an optional Lazy-SMP worker
//! pool sharing one transposition table.

mod pvs;
mod smp;
mod time;

pub use pvs::{SearchParams, SearchResult, SharedSearchState, Worker};
pub use smp::{search_with_workers, search_with_workers_and_oracle};
pub use time::{SearchLimits, TimeBudget};

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::board::Board;
use crate::eval::EvalParams;
use crate::tablebase::{NullOracle, TablebaseOracle};
use crate::tt::TranspositionTable;

/// Owns the long-lived pieces of a search session across multiple `go`
/// commands: the transposition table survives between searches (so a
/// `position` + `go` pair following an earlier one benefits from prior
/// work), while the stop flag and node counter are reset per search.
#[derive(Clone)]
pub struct Engine {
    tt: Arc<TranspositionTable>,
    eval_params: EvalParams,
    search_params: SearchParams,
    threads: usize,
    tablebase: Arc<dyn TablebaseOracle>,
}

impl Engine {
    #[must_use]
    pub fn new(hash_mb: usize, threads: usize) -> Self {
        Engine {
            tt: Arc::new(TranspositionTable::new(hash_mb.max(1))),
            eval_params: EvalParams::default(),
            search_params: SearchParams::default(),
            threads: threads.max(1),
            tablebase: Arc::new(NullOracle),
        }
    }

    /// Plug in a tablebase oracle; the crate ships only the `NullOracle`
    /// default.
    pub fn set_tablebase(&mut self, oracle: Arc<dyn TablebaseOracle>) {
        self.tablebase = oracle;
    }

    pub fn resize_hash(&mut self, hash_mb: usize) {
        self.tt = Arc::new(TranspositionTable::new(hash_mb.max(1)));
    }

    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads.max(1);
    }

    pub fn clear_hash(&self) {
        self.tt.clear();
    }

    /// Run a full search, reporting each completed iteration via
    /// `on_iteration` (for UCI `info` lines) and returning the final
    /// result once the time budget, depth limit, or `stop` fires.
    pub fn go(&self, board: &Board, limits: &SearchLimits, stop: Arc<AtomicBool>, on_iteration: impl FnMut(&SearchResult) + Send) -> SearchResult {
        let side_white = board.side_to_move() == crate::types::Color::White;
        let budget = TimeBudget::from_limits(limits, side_white);
        let mut search_params = self.search_params.clone();
        if let Some(depth) = limits.depth {
            search_params.max_depth = depth;
        }
        if let Some(ref moves) = limits.search_moves {
            search_params.root_search_moves = Some(moves.clone());
        }

        search_with_workers_and_oracle(board, self.threads, Arc::clone(&self.tt), budget, self.eval_params.clone(), search_params, stop, Arc::clone(&self.tablebase), on_iteration)
    }

    #[must_use]
    pub fn hashfull_permille(&self) -> u32 {
        self.tt.hashfull_permille()
    }
}

/// A cooperative node counter and stop flag shared across `stop`/`go`
/// command handling in the UCI layer, independent of any one search's
/// internal `SharedSearchState`.
#[derive(Default)]
pub struct StopController {
    flag: Arc<AtomicBool>,
}

impl StopController {
    #[must_use]
    pub fn new() -> Self {
        StopController { flag: Arc::new(AtomicBool::new(false)) }
    }

    #[must_use]
    pub fn handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}
