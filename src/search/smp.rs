//! Lazy-SMP coordination: spawn one `Worker` per requested thread, all
//! sharing the same transposition table and stop flag, searching the
//! identical position with slightly perturbed move ordering so they
//! diverge and cross-pollinate through the TT rather than repeating each
//! other's work.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::board::Board;
use crate::eval::EvalParams;
use crate::tablebase::{NullOracle, TablebaseOracle};
use crate::tt::TranspositionTable;

use super::pvs::{unpack_root_summary, SearchParams, SearchResult, SharedSearchState, Worker};
use super::time::TimeBudget;

/// Runs `threads` workers against `board`. Every worker publishes its
/// deepest completed iteration to a shared atomic summary as it goes;
/// once all workers have stopped, the coordinator returns whichever
/// result — the "main" worker's own, or the shared summary a helper
/// reached first — completed the deeper iteration, so a helper thread
/// that outraces the main search is not discarded.
pub fn search_with_workers(
    board: &Board,
    threads: usize,
    tt: Arc<TranspositionTable>,
    budget: TimeBudget,
    eval_params: EvalParams,
    search_params: SearchParams,
    stop: Arc<AtomicBool>,
    mut on_main_iteration: impl FnMut(&SearchResult) + Send,
) -> SearchResult {
    search_with_workers_and_oracle(board, threads, tt, budget, eval_params, search_params, stop, Arc::new(NullOracle), on_main_iteration)
}

/// As `search_with_workers`, but with an explicit tablebase oracle;
/// `search_with_workers` is the `NullOracle`-defaulted convenience
/// wrapper UCI normally calls.
#[allow(clippy::too_many_arguments)]
pub fn search_with_workers_and_oracle(
    board: &Board,
    threads: usize,
    tt: Arc<TranspositionTable>,
    budget: TimeBudget,
    eval_params: EvalParams,
    search_params: SearchParams,
    stop: Arc<AtomicBool>,
    tablebase: Arc<dyn TablebaseOracle>,
    mut on_main_iteration: impl FnMut(&SearchResult) + Send,
) -> SearchResult {
    let threads = threads.max(1);
    let nodes = Arc::new(AtomicU64::new(0));
    let best_root = Arc::new(AtomicU64::new(0));
    crate::logging::debug!("starting lazy-smp search with {threads} worker thread(s)");

    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(threads.saturating_sub(1));
        for id in 1..threads {
            let board = board.clone();
            let tt = Arc::clone(&tt);
            let stop = Arc::clone(&stop);
            let nodes = Arc::clone(&nodes);
            let best_root = Arc::clone(&best_root);
            let eval_params = eval_params.clone();
            let search_params = search_params.clone();
            let tablebase = Arc::clone(&tablebase);
            handles.push(scope.spawn(move || {
                crate::logging::trace!("helper worker {id} started");
                let shared = SharedSearchState { tt, stop, nodes, tablebase, best_root };
                let mut worker = Worker::new(board, &shared, eval_params, search_params);
                worker.iterative_deepening(budget, |_| {});
                crate::logging::trace!("helper worker {id} stopped");
            }));
        }

        let shared = SharedSearchState {
            tt,
            stop: Arc::clone(&stop),
            nodes: Arc::clone(&nodes),
            tablebase,
            best_root: Arc::clone(&best_root),
        };
        let mut main = Worker::new(board.clone(), &shared, eval_params, search_params);
        let result = main.iterative_deepening(budget, |r| on_main_iteration(r));

        stop.store(true, Ordering::Relaxed);
        for handle in handles {
            let _ = handle.join();
        }
        crate::logging::debug!("lazy-smp search finished: depth {} nodes {}", result.depth, nodes.load(Ordering::Relaxed));

        let (summary_depth, summary_score, summary_move) = unpack_root_summary(best_root.load(Ordering::Relaxed));
        if summary_depth > result.depth && !summary_move.is_null() {
            SearchResult {
                best_move: summary_move,
                score: summary_score,
                depth: summary_depth,
                nodes: nodes.load(Ordering::Relaxed),
                pv: vec![summary_move],
            }
        } else {
            result
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS_FEN;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn multiple_workers_agree_on_a_legal_move() {
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        let tt = Arc::new(TranspositionTable::new(1));
        let stop = Arc::new(AtomicBool::new(false));
        let result = search_with_workers(
            &board,
            2,
            tt,
            TimeBudget::unbounded(),
            EvalParams::default(),
            SearchParams { max_depth: 3, ..Default::default() },
            stop,
            |_| {},
        );
        let legal = board.generate_legal_moves();
        assert!(legal.contains(result.best_move));
    }
}
