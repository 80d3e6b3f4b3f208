//! Time management: turns a UCI `go` command's clock parameters into a
//! soft and hard budget for the current move.

use std::time::Duration;

use crate::types::Move;

/// Clock/limit parameters as received from the `go` command.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub movetime: Option<Duration>,
    pub wtime: Option<Duration>,
    pub btime: Option<Duration>,
    pub winc: Option<Duration>,
    pub binc: Option<Duration>,
    pub moves_to_go: Option<u32>,
    pub infinite: bool,
    /// `go searchmoves m1 m2 ...`: restrict the root move loop to these
    /// moves. `None` considers every legal root move.
    pub search_moves: Option<Vec<Move>>,
}

/// Soft/hard budget for the move about to be searched. The soft budget is
/// checked between iterative-deepening iterations (never abandon a
/// started iteration early); the hard budget is checked inside the search
/// itself via node-count polling so a runaway iteration still gets cut off.
#[derive(Clone, Copy, Debug)]
pub struct TimeBudget {
    pub soft: Duration,
    pub hard: Duration,
}

const MOVE_OVERHEAD: Duration = Duration::from_millis(30);
const ASSUMED_MOVES_TO_GO: u32 = 30;

impl TimeBudget {
    /// Infinite search / depth-only / node-only limits get an effectively
    /// unbounded budget; the caller stops on the other limit instead.
    #[must_use]
    pub fn unbounded() -> Self {
        TimeBudget {
            soft: Duration::from_secs(3600),
            hard: Duration::from_secs(3600),
        }
    }

    #[must_use]
    pub fn from_limits(limits: &SearchLimits, side_to_move_is_white: bool) -> Self {
        if limits.infinite || (limits.depth.is_some() && limits.movetime.is_none() && limits.wtime.is_none()) {
            return TimeBudget::unbounded();
        }
        if let Some(movetime) = limits.movetime {
            let hard = movetime.saturating_sub(MOVE_OVERHEAD).max(Duration::from_millis(1));
            return TimeBudget { soft: hard, hard };
        }

        let (time, inc) = if side_to_move_is_white {
            (limits.wtime, limits.winc.unwrap_or_default())
        } else {
            (limits.btime, limits.binc.unwrap_or_default())
        };

        let Some(time) = time else {
            return TimeBudget::unbounded();
        };

        let moves_to_go = limits.moves_to_go.unwrap_or(ASSUMED_MOVES_TO_GO).max(1);
        let base = time / moves_to_go + inc;
        let soft = base.saturating_sub(MOVE_OVERHEAD).max(Duration::from_millis(1));
        let hard = (base * 3).min(time.saturating_sub(MOVE_OVERHEAD)).max(soft);
        TimeBudget { soft, hard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movetime_reserves_the_overhead() {
        let limits = SearchLimits {
            movetime: Some(Duration::from_millis(1000)),
            ..Default::default()
        };
        let budget = TimeBudget::from_limits(&limits, true);
        assert_eq!(budget.soft, budget.hard);
        assert!(budget.hard < Duration::from_millis(1000));
    }

    #[test]
    fn wtime_splits_across_assumed_moves_to_go() {
        let limits = SearchLimits {
            wtime: Some(Duration::from_secs(60)),
            ..Default::default()
        };
        let budget = TimeBudget::from_limits(&limits, true);
        assert!(budget.soft < Duration::from_secs(60));
        assert!(budget.hard >= budget.soft);
    }

    #[test]
    fn infinite_search_is_unbounded() {
        let limits = SearchLimits {
            infinite: true,
            ..Default::default()
        };
        let budget = TimeBudget::from_limits(&limits, true);
        assert!(budget.hard >= Duration::from_secs(60));
    }
}
