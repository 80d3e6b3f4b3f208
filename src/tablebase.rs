//! Endgame tablebase oracle interface: the prober itself is an external
//! collaborator ("plug-in oracle") and is out of scope. This module only
//! specifies the seam the search calls into — a trait `TablebaseOracle`
//! plus a no-op `NullOracle` default — so `setoption name
//! SyzygyPath` and the non-root probe point in `search::pvs` have somewhere
//! to plug in a real Syzygy/Gaviota prober without the search caring which.

use crate::board::Board;
use crate::types::Move;

/// A tablebase lookup result, from the side-to-move's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TbResult {
    Win,
    Loss,
    Draw,
}

impl TbResult {
    /// Convert to a search bound in centipawns, biased away from the mate
    /// score band so it can't be mistaken for a search-found mate.
    #[must_use]
    pub fn to_score(self, ply: u32) -> i32 {
        const TB_WIN: i32 = 20_000;
        match self {
            TbResult::Win => TB_WIN - ply as i32,
            TbResult::Loss => -TB_WIN + ply as i32,
            TbResult::Draw => 0,
        }
    }
}

/// The interface the search assumes for its tablebase probe: if an oracle
/// is present and piece count is at or below the oracle's cardinality, at
/// non-root interior nodes. Cardinality and path are the oracle's own
/// configuration; the search only ever asks "do you have this position"
/// and "what move do you
/// recommend at the root".
pub trait TablebaseOracle: Send + Sync {
    /// Maximum total piece count (both colors, kings included) this oracle
    /// can answer for. The search only probes at or below this count.
    fn max_pieces(&self) -> u32;

    /// Probe a WDL (win/draw/loss) result for `board`, if tabulated.
    fn probe_wdl(&self, board: &Board) -> Option<TbResult>;

    /// Probe the best move at the root, if `board` is in the oracle's
    /// tables (DTZ-optimal or similar). Returns `None` to fall back to
    /// ordinary search.
    fn probe_root(&self, board: &Board) -> Option<Move> {
        let _ = board;
        None
    }
}

/// Always-miss oracle: the default when no `SyzygyPath` is configured, and
/// the only implementation this crate ships (the prober itself is out of
/// scope).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullOracle;

impl TablebaseOracle for NullOracle {
    fn max_pieces(&self) -> u32 {
        0
    }

    fn probe_wdl(&self, _board: &Board) -> Option<TbResult> {
        None
    }
}
