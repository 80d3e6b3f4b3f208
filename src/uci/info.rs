//! `info` line formatting: depth, seldepth, multipv, score (cp or mate),
//! nodes, nps, time, hashfull, tbhits, and the PV.

use std::fmt::Write as _;

use crate::tt::MATE_THRESHOLD;
use crate::types::Move;

/// One reportable search snapshot. `score_cp`/`score_mate` are mutually
/// exclusive, matching UCI's `score cp N` / `score mate N`.
#[derive(Clone, Debug, Default)]
pub struct InfoLine {
    pub depth: u32,
    pub seldepth: u32,
    pub multipv: u32,
    pub score_cp: Option<i32>,
    pub score_mate: Option<i32>,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u128,
    pub hashfull: u32,
    pub tbhits: u64,
    pub pv: Vec<Move>,
}

impl InfoLine {
    /// Build an `InfoLine` from a raw centipawn score, classifying it as a
    /// mate score when it's past `MATE_THRESHOLD`.
    #[must_use]
    pub fn from_score(score: i32, depth: u32, nodes: u64, time_ms: u128, hashfull: u32, pv: Vec<Move>) -> Self {
        let nps = if time_ms > 0 { (nodes as u128 * 1000 / time_ms) as u64 } else { nodes };
        let (score_cp, score_mate) = if score.abs() > MATE_THRESHOLD {
            let mate_score = crate::tt::MATE_SCORE;
            let plies_to_mate = mate_score - score.abs();
            let moves_to_mate = (plies_to_mate + 1) / 2;
            (None, Some(if score > 0 { moves_to_mate } else { -moves_to_mate }))
        } else {
            (Some(score), None)
        };
        InfoLine {
            depth,
            seldepth: depth,
            multipv: 1,
            score_cp,
            score_mate,
            nodes,
            nps,
            time_ms,
            hashfull,
            tbhits: 0,
            pv,
        }
    }

    #[must_use]
    pub fn to_uci_line(&self) -> String {
        let mut out = String::from("info");
        let _ = write!(out, " depth {}", self.depth);
        let _ = write!(out, " seldepth {}", self.seldepth);
        let _ = write!(out, " multipv {}", self.multipv);
        if let Some(mate) = self.score_mate {
            let _ = write!(out, " score mate {mate}");
        } else if let Some(cp) = self.score_cp {
            let _ = write!(out, " score cp {cp}");
        }
        let _ = write!(out, " nodes {}", self.nodes);
        let _ = write!(out, " nps {}", self.nps);
        let _ = write!(out, " time {}", self.time_ms);
        let _ = write!(out, " hashfull {}", self.hashfull);
        if self.tbhits > 0 {
            let _ = write!(out, " tbhits {}", self.tbhits);
        }
        if !self.pv.is_empty() {
            out.push_str(" pv");
            for mv in &self.pv {
                let _ = write!(out, " {mv}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    #[test]
    fn plain_score_formats_as_centipawns() {
        let line = InfoLine::from_score(35, 8, 12_345, 100, 50, vec![]);
        let rendered = line.to_uci_line();
        assert!(rendered.contains("score cp 35"));
        assert!(rendered.contains("depth 8"));
        assert!(rendered.contains("nodes 12345"));
    }

    #[test]
    fn near_mate_score_formats_as_mate_in_n() {
        let mate_in_3 = crate::tt::MATE_SCORE - 5;
        let line = InfoLine::from_score(mate_in_3, 10, 1, 1, 0, vec![]);
        assert!(line.to_uci_line().contains("score mate 3"));
    }

    #[test]
    fn pv_is_space_separated_long_algebraic() {
        let pv = vec![
            Move::quiet(Square::new(1, 4), Square::new(3, 4)),
            Move::quiet(Square::new(6, 4), Square::new(4, 4)),
        ];
        let line = InfoLine::from_score(0, 1, 0, 1, 0, pv);
        assert!(line.to_uci_line().ends_with("pv e2e4 e7e5"));
    }
}
