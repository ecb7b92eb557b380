/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Bitboard, Color, EvalConfig, Piece, Square};

use super::context::EvalContext;

/// Coordination balance, from White's point of view.
///
/// Each side's harmony score is added to the support value of each of its pieces.
/// Both totals are then divided by whichever of them has the larger magnitude, sign included.
pub(super) fn evaluate(ctx: &EvalContext, config: &EvalConfig, harmony: (i32, i32)) -> f32 {
    let total = |color: Color, harmony: i32| {
        ctx.position
            .pieces_of(color)
            .map(|(square, piece)| support(ctx, square, piece, config))
            .fold(harmony as f32, |acc, value| acc + value)
    };

    let (white, black) = normalize(total(Color::White, harmony.0), total(Color::Black, harmony.1));

    white - black
}

/// Divides both totals by the one with the larger magnitude, keeping its sign.
///
/// A negative dominant total flips both signs. Ties go to White's total.
/// If the dominant total is zero, both are returned unchanged.
fn normalize(white: f32, black: f32) -> (f32, f32) {
    let dominant = if white.abs() >= black.abs() { white } else { black };

    if dominant == 0.0 {
        (white, black)
    } else {
        (white / dominant, black / dominant)
    }
}

/// How exposed the piece on `square` is, offset by how well it is placed.
fn support(ctx: &EvalContext, square: Square, piece: Piece, config: &EvalConfig) -> f32 {
    let color = piece.color();
    let attackers = ctx.attackers_of(square, color.opponent()).len();
    let defenders = ctx.attackers_of(square, color).len();

    let mut value = attackers as f32 - defenders as f32;

    if Bitboard::CENTER.contains(square) {
        value += config.coordination_center_bonus;
    }

    if Bitboard::KEY_SQUARES.contains(square) {
        value += config.coordination_key_square_bonus;
    }

    if attackers > 0 && defenders == 0 {
        value -= config.coordination_hanging_penalty;
    }

    value + mobility_bonus(ctx, square, piece, config)
}

/// Bonus for the future mobility of the piece on `square`.
fn mobility_bonus(ctx: &EvalContext, square: Square, piece: Piece, config: &EvalConfig) -> f32 {
    if piece.is_pawn() {
        // Fourth rank
        if square.relative_rank(piece.color()) == 3 {
            config.coordination_advanced_pawn_bonus
        } else {
            0.0
        }
    } else {
        ctx.attacks(square).len() as f32 * config.mobility_multiplier(piece.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::harmony;
    use crate::Position;

    #[test]
    fn test_coordination_start_position() {
        let position = Position::default();
        let ctx = EvalContext::new(&position);
        let score = evaluate(&ctx, &EvalConfig::default(), (12, 12));
        assert!(score.abs() < 1e-5, "{score}");
    }

    #[test]
    fn test_coordination_is_normalized() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/QQQQK3").unwrap();
        let ctx = EvalContext::new(&position);
        let score = evaluate(&ctx, &EvalConfig::default(), (40, 0));
        assert!(score > 0.0 && score <= 2.0);
    }

    #[test]
    fn test_normalize_keeps_sign_of_dominant_total() {
        assert_eq!(normalize(-2.0, 1.0), (1.0, -0.5));
        assert_eq!(normalize(1.0, -4.0), (-0.25, 1.0));
        assert_eq!(normalize(4.0, 2.0), (1.0, 0.5));
        assert_eq!(normalize(-3.0, 3.0), (1.0, -1.0));
    }

    #[test]
    fn test_normalize_zero_totals_unchanged() {
        assert_eq!(normalize(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_coordination_negative_dominant_total() {
        // White's total is -2 and Black's is 1; dividing by -2 gives 1 - (-0.5)
        let position = Position::from_fen("k7/8/8/8/K7/1P6/8/3P4").unwrap();
        let ctx = EvalContext::new(&position);
        let config = EvalConfig::default();
        let harmony = harmony::evaluate(&ctx, &config);

        let score = evaluate(&ctx, &config, harmony);
        assert!((score - 1.5).abs() < 1e-5, "{score}");
    }

    #[test]
    fn test_coordination_zero_totals() {
        // Bare Kings with zero harmony: nothing to normalize
        let position = Position::from_fen("k7/8/8/8/8/8/8/7K").unwrap();
        let ctx = EvalContext::new(&position);
        assert_eq!(evaluate(&ctx, &EvalConfig::default(), (0, 0)), 0.0);
    }

    #[test]
    fn test_mobility_bonus() {
        let position = Position::from_fen("4k3/8/8/8/3PN3/8/8/4K3").unwrap();
        let ctx = EvalContext::new(&position);
        let config = EvalConfig::default();

        assert_eq!(mobility_bonus(&ctx, Square::D4, Piece::WHITE_PAWN, &config), 0.5);
        assert_eq!(mobility_bonus(&ctx, Square::E4, Piece::WHITE_KNIGHT, &config), 8.0 * 0.1);
        assert_eq!(mobility_bonus(&ctx, Square::E1, Piece::WHITE_KING, &config), 0.0);
    }
}
