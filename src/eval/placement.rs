/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::Color;

use super::{context::EvalContext, psqt::Psqt};

/// Sum of the Piece-Square table values of `color`'s pieces.
pub(super) fn evaluate(ctx: &EvalContext, color: Color) -> i32 {
    ctx.position
        .pieces_of(color)
        .map(|(square, piece)| Psqt::eval(piece, square))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_placement_start_position() {
        let position = Position::default();
        let ctx = EvalContext::new(&position);
        // Pawns: 2 * 5 + 4 * 10 - 2 * 20; Knights: 2 * -40; Bishops: 2 * -10; Rooks: 0; Queen: -5; King: 0
        let expected = 10 - 80 - 20 - 5;
        assert_eq!(evaluate(&ctx, Color::White), expected);
        assert_eq!(evaluate(&ctx, Color::Black), expected);
    }

    #[test]
    fn test_placement_centralized_knight() {
        let position = Position::from_fen("4k3/8/8/8/4N3/8/8/4K3").unwrap();
        let ctx = EvalContext::new(&position);
        assert_eq!(evaluate(&ctx, Color::White), 20);
        assert_eq!(evaluate(&ctx, Color::Black), 0);
    }
}
