/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Bitboard, Color, EvalConfig, PieceKind};

use super::{context::EvalContext, harmony, king, pawns};

/// How much time `color` has gained: development, threats, flexibility, safety, and the initiative.
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &EvalConfig) -> f32 {
    development(ctx, color)
        + harmony::key_square_control(ctx, color)
        + threat_presence(ctx, color)
        + flexibility(ctx, color)
        + king::evaluate(ctx, color, config) as f32
        + pawns::structure_score(ctx, color) as f32
        + initiative(ctx, color)
        + tempo_advantage(ctx, color)
}

/// Minor pieces off the back rank, Rooks ready on open files, and pairs of minor pieces.
fn development(ctx: &EvalContext, color: Color) -> f32 {
    let mut score = 0.0;

    for (square, piece) in ctx.position.pieces_of(color) {
        let on_back_rank = square.relative_rank(color) == 0;

        match piece.kind() {
            PieceKind::Knight | PieceKind::Bishop if !on_back_rank => {
                score += 0.5 * piece.value() as f32;
            }

            PieceKind::Rook if on_back_rank => {
                if ctx.is_open_file(square) {
                    score += 7.5;
                } else if ctx.is_semi_open_file(square, color) {
                    score += 5.0;
                }
            }

            _ => {}
        }
    }

    let minors: Vec<i32> = ctx
        .position
        .pieces_of(color)
        .filter(|(_, piece)| piece.kind().is_minor())
        .map(|(_, piece)| piece.value())
        .collect();

    for (i, first) in minors.iter().enumerate() {
        for second in &minors[i + 1..] {
            score += 0.1 * (first + second) as f32;
        }
    }

    score
}

/// Squares and pieces `color` is hitting, and moves that check or land on a defended square.
fn threat_presence(ctx: &EvalContext, color: Color) -> f32 {
    let opponent = color.opponent();
    let mut score = 0.1 * ctx.attacked_by[color].len() as f32;

    for (square, target) in ctx.position.pieces_of(opponent) {
        let attackers = ctx.attackers_of(square, color).len();
        score += 0.2 * target.value() as f32 * attackers as f32;
    }

    for mv in ctx.moves_for(color) {
        let after = ctx.position.simulate(mv.from(), mv.to());

        if after.is_in_check(opponent) {
            score += 2.0;
        }

        let heavy_or_knight = after
            .kind_at(mv.to())
            .is_some_and(|kind| matches!(kind, PieceKind::Knight | PieceKind::Rook | PieceKind::Queen));

        if heavy_or_knight && after.attackers_of(mv.to(), color).is_nonempty() {
            score += 1.0;
        }
    }

    score
}

/// Room for `color`'s pieces to maneuver, and for its Pawns to step aside.
fn flexibility(ctx: &EvalContext, color: Color) -> f32 {
    let own = ctx.position.color_mask(color);
    let mut score = 0.0;

    for (square, piece) in ctx.position.pieces_of(color) {
        let attacks = ctx.attacks(square);
        score += attacks.len() as f32;
        score += 0.5 * (attacks & own).len() as f32;

        if Bitboard::CENTER.contains(square) {
            score += 1.0;
        }

        if piece.is_pawn() {
            let open_sides = [-1, 1]
                .into_iter()
                .filter_map(|dc| square.offset(0, dc))
                .filter(|&beside| !ctx.position.has(beside))
                .count();
            score += 0.5 * open_sides as f32;
        }
    }

    score
}

fn initiative(ctx: &EvalContext, color: Color) -> f32 {
    let opponent = color.opponent();
    let targets = ctx.position.color_mask(opponent) & ctx.attacked_by[color];
    let mut score = 0.5 * targets.len() as f32;

    if ctx.in_check(opponent) {
        score += 1.0;
    }

    score + 0.5 * ctx.count_on(color, Bitboard::CENTER) as f32
}

fn tempo_advantage(ctx: &EvalContext, color: Color) -> f32 {
    let defenders: usize = ctx
        .position
        .pieces_of(color)
        .map(|(square, _)| ctx.attackers_of(square, color).len())
        .sum();

    0.1 * ctx.mobility(color) as f32 + 0.05 * defenders as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eval::truncate, Position};

    fn with_ctx<T>(fen: &str, f: impl FnOnce(&EvalContext) -> T) -> T {
        let position = Position::from_fen(fen).unwrap();
        f(&EvalContext::new(&position))
    }

    #[test]
    fn test_tempo_start_position_is_balanced() {
        with_ctx(crate::FEN_STARTPOS, |ctx| {
            let config = EvalConfig::default();
            let balance = evaluate(ctx, Color::White, &config) - evaluate(ctx, Color::Black, &config);
            assert_eq!(truncate(balance), 0);
        });
    }

    #[test]
    fn test_development() {
        // Knight off the back rank, Rook on an open file
        with_ctx("4k3/8/8/8/8/2N5/8/R3K3", |ctx| {
            assert_eq!(development(ctx, Color::White), 1.5 + 7.5);
            assert_eq!(development(ctx, Color::Black), 0.0);
        });

        // Rook behind its own Pawn
        with_ctx("4k3/8/8/8/8/8/P7/R3K3", |ctx| {
            assert_eq!(development(ctx, Color::White), 5.0);
        });

        // A pair of developed Knights
        with_ctx("4k3/8/8/8/8/2N2N2/8/4K3", |ctx| {
            let score = development(ctx, Color::White);
            assert!((score - 3.6).abs() < 1e-5, "{score}");
        });
    }

    #[test]
    fn test_flexibility_pawn_sides() {
        // A lone Pawn on a4 has one free side; its attack on b5 counts too
        with_ctx("4k3/8/8/8/P7/8/8/8", |ctx| {
            assert_eq!(flexibility(ctx, Color::White), 1.0 + 0.5);
        });
    }

    #[test]
    fn test_initiative_with_check() {
        // The e1 Rook checks the e8 King
        with_ctx("4k3/8/8/8/8/8/8/4R1K1", |ctx| {
            assert_eq!(initiative(ctx, Color::White), 0.5 + 1.0);
            assert_eq!(initiative(ctx, Color::Black), 0.0);
        });
    }

    #[test]
    fn test_threat_presence() {
        // 16 squares attacked, Ra8+ checks, and Rg1 lands next to the King
        with_ctx("7k/8/8/8/8/8/8/R6K", |ctx| {
            let score = threat_presence(ctx, Color::White);
            assert!((score - (1.6 + 2.0 + 1.0)).abs() < 1e-5, "{score}");
        });
    }
}
