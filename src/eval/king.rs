/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{king_attacks, Bitboard, Color, EvalConfig};

use super::context::EvalContext;

/// How well `color`'s King is sheltered.
///
/// Friendly Pawns around and in front of the King raise the score, as do safe King moves.
/// Adjacent squares the opponent attacks, and files around the King without a friendly Pawn, lower it.
///
/// A side without a King scores 0.
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &EvalConfig) -> i32 {
    let Some(king) = ctx.king_for(color) else {
        return 0;
    };

    let opponent = color.opponent();
    let own_pawns = ctx.position.pawns(color);
    let neighbours = king_attacks(king);

    let cover = (neighbours & own_pawns).len() as i32;

    let pressure = neighbours
        .iter()
        .filter(|&square| ctx.position.is_square_attacked(square, opponent))
        .count() as i32;

    let exposed_files = (-1..=1)
        .filter_map(|dc| king.offset(0, dc))
        .filter(|square| !Bitboard::from_col(square.col()).intersects(own_pawns))
        .count() as i32;

    let shield = king
        .forward_by(color, 1)
        .map(|front| {
            (-1..=1)
                .filter_map(|dc| front.offset(0, dc))
                .filter(|&square| own_pawns.contains(square))
                .count() as i32
        })
        .unwrap_or_default();

    let mobility = ctx
        .moves_for(color)
        .iter()
        .filter(|mv| mv.from() == king)
        .count()
        .min(config.king_mobility_cap) as i32;

    cover - pressure - exposed_files + shield + mobility
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn king_safety(fen: &str, color: Color) -> i32 {
        let position = Position::from_fen(fen).unwrap();
        let ctx = EvalContext::new(&position);
        evaluate(&ctx, color, &EvalConfig::default())
    }

    #[test]
    fn test_king_safety_start_position() {
        // Three Pawns around the King, the same three in front of it, and no moves
        let fen = crate::FEN_STARTPOS;
        assert_eq!(king_safety(fen, Color::White), 6);
        assert_eq!(king_safety(fen, Color::Black), 6);
    }

    #[test]
    fn test_king_safety_missing_king() {
        assert_eq!(king_safety("8/8/8/8/8/8/8/4K3", Color::Black), 0);
    }

    #[test]
    fn test_king_safety_bare_king() {
        // Three open files, five moves, nothing attacked
        assert_eq!(king_safety("k7/8/8/8/8/8/8/4K3", Color::White), 2);
    }

    #[test]
    fn test_king_safety_mobility_is_capped() {
        // Eight moves, capped to five, and three open files
        assert_eq!(king_safety("k7/8/8/8/4K3/8/8/8", Color::White), 2);
    }

    #[test]
    fn test_king_safety_pressure() {
        // The Rook on d8 covers d1 and d2; both are adjacent to the King
        let sheltered = king_safety("k2r4/8/8/8/8/8/8/4K3", Color::White);
        assert_eq!(sheltered, -3 - 2 + 3);
    }
}
