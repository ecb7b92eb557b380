/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Tunable weights used by the factor evaluators.
///
/// [`EvalConfig::default`] reproduces the weights of the reference heuristics,
/// so two evaluations built with default configs are always identical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalConfig {
    // Piece mobility
    pub mobility_legal_weight: f32,
    pub mobility_central_weight: f32,
    pub mobility_occupancy_weight: f32,
    pub mobility_piece_count_weight: f32,
    pub mobility_pawn_count_weight: f32,
    pub mobility_open_file_weight: f32,
    pub mobility_king_safety_weight: f32,
    pub mobility_tactics_weight: f32,

    // Piece coordination
    pub coordination_center_bonus: f32,
    pub coordination_key_square_bonus: f32,
    pub coordination_hanging_penalty: f32,
    pub coordination_advanced_pawn_bonus: f32,
    pub knight_mobility_multiplier: f32,
    pub bishop_mobility_multiplier: f32,
    pub rook_mobility_multiplier: f32,
    pub queen_mobility_multiplier: f32,

    // Pawn structure
    pub pawn_structure_weight: f32,
    pub pawn_chain_weight: f32,
    pub pawn_attack_weight: f32,
    pub pawn_break_weight: f32,

    // Piece activity
    pub activity_mobility_weight: f32,
    pub activity_centralization_weight: f32,
    pub activity_occupancy_weight: f32,

    // King safety
    pub king_mobility_cap: usize, // legal King moves counted at most this many times

    // Piece placement
    pub psqt_divisor: i32, // a divisor of 0 leaves totals unscaled

    // Tactics
    pub checkmate_bonus: f32,
}

impl EvalConfig {
    /// Scales a Piece-Square table total down by [`EvalConfig::psqt_divisor`], truncating toward zero.
    ///
    /// # Example
    /// ```
    /// # use harmony::EvalConfig;
    /// let mut config = EvalConfig::default();
    /// assert_eq!(config.scale_psqt(-95), -9);
    ///
    /// config.psqt_divisor = 0;
    /// assert_eq!(config.scale_psqt(-95), -95);
    /// ```
    #[inline(always)]
    pub fn scale_psqt(&self, total: i32) -> i32 {
        total.checked_div(self.psqt_divisor).unwrap_or(total)
    }

    /// Mobility multiplier applied to the number of squares attacked by a piece of `kind`.
    ///
    /// Pawns and Kings have no multiplier.
    #[inline(always)]
    pub const fn mobility_multiplier(&self, kind: crate::PieceKind) -> f32 {
        use crate::PieceKind::*;
        match kind {
            Knight => self.knight_mobility_multiplier,
            Bishop => self.bishop_mobility_multiplier,
            Rook => self.rook_mobility_multiplier,
            Queen => self.queen_mobility_multiplier,
            Pawn | King => 0.0,
        }
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            mobility_legal_weight: 0.2,
            mobility_central_weight: 0.1,
            mobility_occupancy_weight: 0.1,
            mobility_piece_count_weight: 0.1,
            mobility_pawn_count_weight: 0.1,
            mobility_open_file_weight: 0.1,
            mobility_king_safety_weight: 0.15,
            mobility_tactics_weight: 0.15,

            coordination_center_bonus: 0.5,
            coordination_key_square_bonus: 0.5,
            coordination_hanging_penalty: 0.5,
            coordination_advanced_pawn_bonus: 0.5,
            knight_mobility_multiplier: 0.1,
            bishop_mobility_multiplier: 0.05,
            rook_mobility_multiplier: 0.03,
            queen_mobility_multiplier: 0.07,

            pawn_structure_weight: 0.4,
            pawn_chain_weight: 0.3,
            pawn_attack_weight: 0.2,
            pawn_break_weight: 0.1,

            activity_mobility_weight: 0.5,
            activity_centralization_weight: 0.3,
            activity_occupancy_weight: 0.2,

            king_mobility_cap: 5,

            psqt_divisor: 10,

            checkmate_bonus: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    #[test]
    fn test_mobility_multipliers() {
        let config = EvalConfig::default();
        assert_eq!(config.mobility_multiplier(PieceKind::Knight), 0.1);
        assert_eq!(config.mobility_multiplier(PieceKind::Queen), 0.07);
        assert_eq!(config.mobility_multiplier(PieceKind::Pawn), 0.0);
        assert_eq!(config.mobility_multiplier(PieceKind::King), 0.0);
    }

    #[test]
    fn test_zero_psqt_divisor_leaves_totals_unscaled() {
        let config = EvalConfig {
            psqt_divisor: 0,
            ..Default::default()
        };
        assert_eq!(config.scale_psqt(37), 37);
        assert_eq!(EvalConfig::default().scale_psqt(37), 3);
    }
}
