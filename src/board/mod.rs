//! Board representation, move generation, and move application.

pub mod error;
mod fen;
mod make_unmake;
mod movegen;
mod perft;
mod see;
mod state;

pub use fen::STARTPOS_FEN;
pub use state::{Board, NullUndoInfo, UndoInfo};

pub use perft::{perft, perft_divide};
