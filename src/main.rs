//! Thin UCI binary: wire up logging and hand stdio to `chess_core::uci::run`.

fn main() {
    chess_core::logging::init();
    let stdin = std::io::stdin();
    chess_core::uci::run(stdin.lock(), std::io::stdout());
}
