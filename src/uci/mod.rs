//! The UCI protocol front-end: a line-oriented loop over any
//! `BufRead`/`Write` pair, so it can be driven by real stdio in
//! `main.rs` or by an in-memory buffer in tests.

mod info;
mod options;

pub use info::InfoLine;
pub use options::{apply_setoption, option_lines};

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::board::{Board, STARTPOS_FEN};
use crate::config::EngineConfig;
use crate::search::{Engine, SearchLimits, SearchResult, StopController};

const ENGINE_NAME: &str = "chess_core";
const ENGINE_AUTHOR: &str = "chess_core contributors";

/// Everything the loop needs across multiple lines: the position, the
/// tunables, the long-lived `Engine` (rebuilt whenever `Hash`/`Threads`
/// change), and the handle to whatever search is currently running.
struct UciSession {
    board: Board,
    config: EngineConfig,
    engine: Engine,
    stop_ctl: StopController,
    search_thread: Option<JoinHandle<()>>,
}

impl UciSession {
    fn new() -> Self {
        let config = EngineConfig::default();
        UciSession {
            board: Board::from_fen(STARTPOS_FEN).expect("startpos FEN is valid"),
            engine: Engine::new(config.hash_mb, config.threads),
            config,
            stop_ctl: StopController::new(),
            search_thread: None,
        }
    }

    /// Block until any in-flight search thread has stopped and reported.
    fn join_search(&mut self) {
        self.stop_ctl.stop();
        if let Some(handle) = self.search_thread.take() {
            let _ = handle.join();
        }
    }
}

/// Run the UCI loop, reading commands from `input` and writing responses
/// (including `info`/`bestmove`) to `output`. Returns when `quit` is read
/// or `input` reaches EOF.
pub fn run<R: BufRead, W: Write + Send + 'static>(input: R, output: W) {
    let output = Arc::new(Mutex::new(output));
    let mut session = UciSession::new();

    for line in input.lines() {
        let Ok(line) = line else { break };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => handle_uci(&output),
            "isready" => writeln_locked(&output, "readyok"),
            "ucinewgame" => {
                session.join_search();
                session.board = Board::from_fen(STARTPOS_FEN).expect("startpos FEN is valid");
                session.engine.clear_hash();
            }
            "setoption" => handle_setoption(&mut session, &parts),
            "position" => {
                session.join_search();
                handle_position(&mut session.board, &parts);
            }
            "go" => handle_go(&mut session, &parts, Arc::clone(&output)),
            "stop" => session.join_search(),
            "ponderhit" => session.stop_ctl.reset(),
            "quit" => {
                session.join_search();
                break;
            }
            other => {
                crate::logging::debug!("ignoring unrecognized UCI command: {other}");
            }
        }
    }
    session.join_search();
}

fn handle_uci<W: Write>(output: &Arc<Mutex<W>>) {
    let mut out = output.lock().expect("uci output mutex poisoned");
    let _ = writeln!(out, "id name {ENGINE_NAME}");
    let _ = writeln!(out, "id author {ENGINE_AUTHOR}");
    for line in option_lines() {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "uciok");
    let _ = out.flush();
}

fn handle_setoption(session: &mut UciSession, parts: &[&str]) {
    match apply_setoption(&mut session.config, &parts[1..]) {
        Ok(result) => {
            if result.hash_changed {
                session.engine.resize_hash(session.config.hash_mb);
            }
            if result.threads_changed {
                session.engine.set_threads(session.config.threads);
            }
        }
        Err(message) => crate::logging::warn!("setoption rejected: {message}"),
    }
}

/// `position [startpos | fen <FEN>] [moves <uci...>]`.
fn handle_position(board: &mut Board, parts: &[&str]) {
    let mut i = 1;
    if parts.get(i) == Some(&"startpos") {
        *board = Board::from_fen(STARTPOS_FEN).expect("startpos FEN is valid");
        i += 1;
    } else if parts.get(i) == Some(&"fen") {
        let moves_pos = parts[i..].iter().position(|&p| p == "moves").map(|p| p + i).unwrap_or(parts.len());
        let fen = parts[i + 1..moves_pos].join(" ");
        match Board::from_fen(&fen) {
            Ok(parsed) => *board = parsed,
            Err(err) => {
                crate::logging::warn!("position fen rejected: {err}");
                return;
            }
        }
        i = moves_pos;
    } else {
        return;
    }

    if parts.get(i) == Some(&"moves") {
        i += 1;
        while i < parts.len() {
            match board.parse_move(parts[i]) {
                Ok(mv) => {
                    board.make_move(mv);
                }
                Err(err) => crate::logging::warn!("illegal move in position command: {err}"),
            }
            i += 1;
        }
    }
}

/// Parsed `go` parameters beyond the plain clock/limit fields that
/// `SearchLimits` already models.
#[derive(Default)]
struct GoExtras {
    perft_depth: Option<u32>,
    search_move_tokens: Vec<String>,
}

/// `go` keywords that terminate a `searchmoves` token run.
const GO_KEYWORDS: &[&str] = &[
    "depth", "nodes", "movetime", "wtime", "btime", "winc", "binc", "movestogo", "mate", "perft", "infinite", "ponder", "searchmoves",
];

fn parse_go(parts: &[&str]) -> (SearchLimits, GoExtras) {
    let mut limits = SearchLimits::default();
    let mut extras = GoExtras::default();
    let mut i = 1;
    while i < parts.len() {
        match parts[i] {
            "depth" => {
                limits.depth = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "nodes" => {
                limits.nodes = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "movetime" => {
                limits.movetime = parts.get(i + 1).and_then(|s| s.parse().ok()).map(Duration::from_millis);
                i += 2;
            }
            "wtime" => {
                limits.wtime = parts.get(i + 1).and_then(|s| s.parse().ok()).map(Duration::from_millis);
                i += 2;
            }
            "btime" => {
                limits.btime = parts.get(i + 1).and_then(|s| s.parse().ok()).map(Duration::from_millis);
                i += 2;
            }
            "winc" => {
                limits.winc = parts.get(i + 1).and_then(|s| s.parse().ok()).map(Duration::from_millis);
                i += 2;
            }
            "binc" => {
                limits.binc = parts.get(i + 1).and_then(|s| s.parse().ok()).map(Duration::from_millis);
                i += 2;
            }
            "movestogo" => {
                limits.moves_to_go = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "mate" => {
                // Mate search is just a depth bound expressed in moves; two plies per move.
                if let Some(n) = parts.get(i + 1).and_then(|s| s.parse::<u32>().ok()) {
                    limits.depth = Some(limits.depth.unwrap_or(64).max(n * 2));
                }
                i += 2;
            }
            "perft" => {
                extras.perft_depth = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "infinite" => {
                limits.infinite = true;
                i += 1;
            }
            "ponder" => {
                // Ponder mode runs the same search unbounded until `ponderhit`/`stop`;
                // the session's stop controller handles the transition.
                limits.infinite = true;
                i += 1;
            }
            "searchmoves" => {
                i += 1;
                while i < parts.len() && !GO_KEYWORDS.contains(&parts[i]) {
                    extras.search_move_tokens.push(parts[i].to_string());
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    (limits, extras)
}

fn handle_go<W: Write + Send + 'static>(session: &mut UciSession, parts: &[&str], output: Arc<Mutex<W>>) {
    session.join_search();
    let (mut limits, extras) = parse_go(parts);

    if !extras.search_move_tokens.is_empty() {
        let mut resolved = Vec::with_capacity(extras.search_move_tokens.len());
        for token in &extras.search_move_tokens {
            match session.board.parse_move(token) {
                Ok(mv) => resolved.push(mv),
                Err(err) => crate::logging::warn!("searchmoves entry {token} rejected: {err}"),
            }
        }
        limits.search_moves = Some(resolved);
    }

    if let Some(depth) = extras.perft_depth {
        let mut board = session.board.clone();
        let start = Instant::now();
        let nodes = crate::board::perft(&mut board, depth);
        let elapsed = start.elapsed();
        writeln_locked(&output, &format!("info string perft {depth} nodes {nodes} time {} ms", elapsed.as_millis()));
        return;
    }

    session.stop_ctl.reset();
    let stop = session.stop_ctl.handle();
    let board = session.board.clone();
    let hashfull = session.engine.hashfull_permille();

    // `Engine` is a thin handle around `Arc`-shared state, so a clone here
    // shares the transposition table with the session's copy while letting
    // this thread run the actual search; `stop`/`ponderhit`/the next `go`
    // act through the shared stop flag.
    let engine = session.engine.clone();
    let handle = std::thread::spawn(move || {
        let result_output = Arc::clone(&output);
        let result: SearchResult = engine.go(&board, &limits, Arc::clone(&stop), move |iter: &SearchResult| {
            let line = InfoLine::from_score(iter.score, iter.depth, iter.nodes, 0, hashfull, iter.pv.clone());
            writeln_locked(&result_output, &line.to_uci_line());
        });
        writeln_locked(&output, &format!("bestmove {}", result.best_move));
    });
    session.search_thread = Some(handle);
}

fn writeln_locked<W: Write>(output: &Arc<Mutex<W>>, line: &str) {
    let mut out = output.lock().expect("uci output mutex poisoned");
    let _ = writeln!(out, "{line}");
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_commands(commands: &str) -> String {
        let input = Cursor::new(commands.as_bytes().to_vec());
        let output: Vec<u8> = Vec::new();
        let output = Arc::new(Mutex::new(output));
        run_with_shared_output(input, Arc::clone(&output));
        let bytes = output.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    // A test-only variant of `run` that keeps the shared `Vec<u8>` sink alive
    // after the loop returns, since `run`'s generic `W` is consumed by value.
    fn run_with_shared_output(input: Cursor<Vec<u8>>, output: Arc<Mutex<Vec<u8>>>) {
        struct SharedSink(Arc<Mutex<Vec<u8>>>);
        impl Write for SharedSink {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().write(buf)
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        run(input, SharedSink(output));
    }

    #[test]
    fn uci_command_reports_id_and_options_and_uciok() {
        let out = run_commands("uci\nquit\n");
        assert!(out.contains("id name"));
        assert!(out.contains("uciok"));
        assert!(out.contains("option name Hash"));
    }

    #[test]
    fn isready_reports_readyok() {
        let out = run_commands("isready\nquit\n");
        assert!(out.contains("readyok"));
    }

    #[test]
    fn go_depth_eventually_prints_a_bestmove() {
        let out = run_commands("position startpos\ngo depth 2\nquit\n");
        assert!(out.contains("bestmove"));
    }

    #[test]
    fn perft_go_reports_node_count() {
        let out = run_commands("position startpos\ngo perft 2\nquit\n");
        assert!(out.contains("info string perft 2 nodes 400"));
    }
}
