//! Tunable evaluation weights: plain data, runtime-loadable, defaulting
//! to hand-tuned constants. No tuning/SPSA harness is in scope.

/// Centipawn weights for every evaluation feature. Grouped by concern so a
/// future tuner can serialize/deserialize a whole profile at once.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalParams {
    pub mobility_mg: [i32; 6],
    pub mobility_eg: [i32; 6],

    pub bishop_pair_mg: i32,
    pub bishop_pair_eg: i32,

    pub doubled_pawn_mg: i32,
    pub doubled_pawn_eg: i32,
    pub isolated_pawn_mg: i32,
    pub isolated_pawn_eg: i32,
    pub backward_pawn_mg: i32,
    pub backward_pawn_eg: i32,
    pub phalanx_pawn_mg: [i32; 8],
    pub phalanx_pawn_eg: [i32; 8],
    pub connected_pawn_mg: [i32; 8],
    pub connected_pawn_eg: [i32; 8],
    pub passed_pawn_mg: [i32; 8],
    pub passed_pawn_eg: [i32; 8],
    pub passed_pawn_defended_mg: i32,
    pub passed_pawn_defended_eg: i32,
    pub passed_pawn_unstoppable_eg: i32,

    /// Material-imbalance adjustments, grounded on the usual "knights like
    /// closed positions, bishops like open ones" and redundant-major-pair
    /// discounts.
    pub knight_pair_penalty_mg: i32,
    pub knight_pair_penalty_eg: i32,
    pub rook_pair_penalty_mg: i32,
    pub rook_pair_penalty_eg: i32,
    pub knight_pawn_adj_mg: i32,
    pub bishop_pawn_adj_mg: i32,
    pub queen_vs_rook_pair_mg: i32,

    pub king_shield_mg: i32,
    pub missing_shield_pawn_mg: i32,
    pub king_storm_mg: [i32; 8],
    pub king_attacker_weight: [i32; 6],
    pub king_safety_scale: i32,
    pub king_safe_check_weight: i32,
    pub king_bishop_pressure_mg: i32,

    pub knight_outpost_mg: i32,
    pub knight_outpost_eg: i32,
    pub bishop_outpost_mg: i32,
    pub bishop_outpost_eg: i32,
    pub fianchetto_bonus_mg: i32,
    pub shielded_minor_mg: i32,
    pub bad_bishop_mg: i32,
    pub bad_bishop_eg: i32,

    pub rook_open_file_mg: i32,
    pub rook_semi_open_file_mg: i32,
    pub rook_seventh_rank_mg: i32,
    pub rook_seventh_rank_eg: i32,

    pub threat_by_minor_mg: i32,
    pub threat_by_minor_eg: i32,
    pub threat_by_rook_mg: i32,
    pub threat_by_rook_eg: i32,
    pub hanging_piece_mg: i32,
    pub hanging_piece_eg: i32,

    pub space_mg: i32,

    /// Out of 64: how much of the endgame score survives in drawish
    /// material configurations (opposite-colored bishops foremost).
    pub opposite_bishop_scale_num: i32,

    pub tempo_mg: i32,
    pub tempo_eg: i32,
}

impl Default for EvalParams {
    fn default() -> Self {
        EvalParams {
            mobility_mg: [0, 4, 4, 2, 1, 0],
            mobility_eg: [0, 3, 3, 3, 2, 0],

            bishop_pair_mg: 30,
            bishop_pair_eg: 45,

            doubled_pawn_mg: -10,
            doubled_pawn_eg: -20,
            isolated_pawn_mg: -12,
            isolated_pawn_eg: -16,
            backward_pawn_mg: -8,
            backward_pawn_eg: -12,
            phalanx_pawn_mg: [0, 3, 5, 8, 12, 18, 25, 0],
            phalanx_pawn_eg: [0, 2, 4, 6, 10, 14, 20, 0],
            connected_pawn_mg: [0, 4, 6, 10, 16, 24, 34, 0],
            connected_pawn_eg: [0, 3, 5, 8, 12, 18, 26, 0],
            passed_pawn_mg: [0, 5, 10, 20, 35, 55, 80, 0],
            passed_pawn_eg: [0, 10, 20, 40, 70, 110, 160, 0],
            passed_pawn_defended_mg: 8,
            passed_pawn_defended_eg: 20,
            passed_pawn_unstoppable_eg: 400,

            knight_pair_penalty_mg: -8,
            knight_pair_penalty_eg: -4,
            rook_pair_penalty_mg: -10,
            rook_pair_penalty_eg: -16,
            knight_pawn_adj_mg: 3,
            bishop_pawn_adj_mg: 3,
            queen_vs_rook_pair_mg: -12,

            king_shield_mg: 8,
            missing_shield_pawn_mg: -10,
            king_storm_mg: [0, -40, -25, -12, -4, 0, 0, 0],
            king_attacker_weight: [0, 20, 20, 40, 80, 0],
            king_safety_scale: 90,
            king_safe_check_weight: 60,
            king_bishop_pressure_mg: -15,

            knight_outpost_mg: 22,
            knight_outpost_eg: 10,
            bishop_outpost_mg: 14,
            bishop_outpost_eg: 6,
            fianchetto_bonus_mg: 10,
            shielded_minor_mg: 4,
            bad_bishop_mg: -4,
            bad_bishop_eg: -8,

            rook_open_file_mg: 20,
            rook_semi_open_file_mg: 10,
            rook_seventh_rank_mg: 15,
            rook_seventh_rank_eg: 25,

            threat_by_minor_mg: 18,
            threat_by_minor_eg: 10,
            threat_by_rook_mg: 22,
            threat_by_rook_eg: 12,
            hanging_piece_mg: 20,
            hanging_piece_eg: 28,

            space_mg: 2,

            opposite_bishop_scale_num: 24,

            tempo_mg: 15,
            tempo_eg: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_symmetric_across_piece_indices() {
        let params = EvalParams::default();
        assert_eq!(params.mobility_mg.len(), 6);
        assert_eq!(params.passed_pawn_mg.len(), 8);
        assert_eq!(params.king_attacker_weight.len(), 6);
    }

    #[test]
    fn opposite_bishop_scale_is_a_fraction_of_full_weight() {
        let params = EvalParams::default();
        assert!(params.opposite_bishop_scale_num > 0 && params.opposite_bishop_scale_num < 64);
    }
}
