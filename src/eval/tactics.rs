/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, EvalConfig};

use super::context::EvalContext;

/// Tactical opportunities available to `color`.
///
/// Every opposing piece is inspected for forks, overloaded defenders, and hanging pieces,
/// and `color` earns one point for every piece of its own bearing down on it.
/// Mobility and a checkmated opponent also count.
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &EvalConfig) -> f32 {
    let opponent = color.opponent();
    let mut score = 0.0;

    for (square, target) in ctx.position.pieces_of(opponent) {
        let attackers = ctx.attackers_of(square, color);
        let defenders = ctx.attackers_of(square, opponent);
        let (a, d) = (attackers.len(), defenders.len());

        // Fork of an undefended piece
        if a > 1 && d == 0 {
            score += 1.0;
        }

        // Overloaded defender
        if a > 1 && d == 1 {
            let lone_defender_is_king = defenders
                .lsb()
                .and_then(|sq| ctx.position.piece_at(sq))
                .is_some_and(|piece| piece.is_king());

            if target.is_king() || !lone_defender_is_king {
                score += 1.0;
            }
        }

        if a == 1 && d > 1 {
            score += 1.0;
        }

        // Hanging
        if a == 1 && d == 0 {
            score += 1.0;
        }

        score += a as f32;
    }

    score += ctx.mobility(color) as f32;

    if ctx.checkmated(opponent) {
        score += config.checkmate_bonus;
    }

    score
}

/// Difference between White's and Black's tactical opportunities.
pub(super) fn balance(ctx: &EvalContext, config: &EvalConfig) -> f32 {
    evaluate(ctx, Color::White, config) - evaluate(ctx, Color::Black, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_tactics_start_position_is_balanced() {
        let position = Position::default();
        let ctx = EvalContext::new(&position);
        let config = EvalConfig::default();

        // No contact between the armies, so only mobility counts
        assert_eq!(evaluate(&ctx, Color::White, &config), 20.0);
        assert_eq!(balance(&ctx, &config), 0.0);
    }

    #[test]
    fn test_tactics_hanging_piece() {
        // The b5 Bishop hits the undefended Knight on c6
        let position = Position::from_fen("4k3/8/2n5/1B6/8/8/8/4K3").unwrap();
        let ctx = EvalContext::new(&position);
        let config = EvalConfig::default();

        let mobility = ctx.mobility(Color::White) as f32;
        // Hanging (+1) and one attacker (+1)
        assert_eq!(evaluate(&ctx, Color::White, &config), mobility + 2.0);
    }

    #[test]
    fn test_tactics_checkmate_bonus() {
        // Fool's mate
        let position = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR").unwrap();
        let ctx = EvalContext::new(&position);
        let config = EvalConfig::default();
        assert!(ctx.checkmated(Color::White));

        let mut no_bonus = config;
        no_bonus.checkmate_bonus = 0.0;
        let diff = evaluate(&ctx, Color::Black, &config) - evaluate(&ctx, Color::Black, &no_bonus);
        assert_eq!(diff, 10.0);
    }
}
