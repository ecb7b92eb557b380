/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Bitboard, Color, EvalConfig, PieceKind};

use super::{context::EvalContext, king, tactics};

/// Mobility balance, from White's point of view.
///
/// Legal moves dominate, but central presence, material on the board, sliders on open files, King shelter,
/// and tactical chances all contribute. Tactics are measured on both the position and its mirror image.
pub(super) fn evaluate(ctx: &EvalContext, config: &EvalConfig) -> f32 {
    let side = |color: Color| {
        let central = ctx.count_on(color, Bitboard::CENTER) as f32;

        config.mobility_legal_weight * ctx.mobility(color) as f32
            + config.mobility_central_weight * central
            + config.mobility_occupancy_weight * central
            + config.mobility_piece_count_weight * ctx.position.piece_count(color) as f32
            + config.mobility_pawn_count_weight * ctx.position.count(color, PieceKind::Pawn) as f32
            + config.mobility_open_file_weight * open_file_sliders(ctx, color) as f32
            + config.mobility_king_safety_weight * king::evaluate(ctx, color, config) as f32
    };

    let mirrored = ctx.position.mirror();
    let tactics = tactics::balance(ctx, config) - tactics::balance(&EvalContext::new(&mirrored), config);

    side(Color::White) - side(Color::Black) + config.mobility_tactics_weight * tactics
}

/// Number of `color`'s Rooks, Bishops, and Queens standing on a file without Pawns.
fn open_file_sliders(ctx: &EvalContext, color: Color) -> usize {
    ctx.position
        .pieces_of(color)
        .filter(|(square, piece)| piece.kind().is_slider() && ctx.is_open_file(*square))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_mobility_start_position() {
        let position = Position::default();
        let ctx = EvalContext::new(&position);
        assert_eq!(evaluate(&ctx, &EvalConfig::default()), 0.0);
    }

    #[test]
    fn test_open_file_sliders() {
        // The a1 Rook's file is open; the c1 Bishop's is not
        let position = Position::from_fen("4k3/8/8/8/8/8/2P5/R1B1K3").unwrap();
        let ctx = EvalContext::new(&position);
        assert_eq!(open_file_sliders(&ctx, Color::White), 1);
    }

    #[test]
    fn test_mobility_favors_the_freer_side() {
        // Black's Queen is missing
        let position = Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap();
        let ctx = EvalContext::new(&position);
        assert!(evaluate(&ctx, &EvalConfig::default()) > 0.0);
    }
}
