/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Bitboard, Color, EvalConfig, Piece, PieceKind, Square};

use super::{context::EvalContext, pawns, psqt::Psqt, truncate};

/// Squares worth controlling, and how much.
#[rustfmt::skip]
const KEY_SQUARE_WEIGHTS: [(Square, f32); 20] = [
    (Square::D4, 1.0), (Square::E4, 1.0), (Square::D5, 1.0), (Square::E5, 1.0),
    (Square::C4, 0.8), (Square::C5, 0.8), (Square::F4, 0.8), (Square::F5, 0.8),
    (Square::D3, 0.7), (Square::E3, 0.7), (Square::D6, 0.7), (Square::E6, 0.7),
    (Square::F2, 0.5), (Square::G2, 0.5), (Square::F3, 0.5), (Square::G3, 0.5),
    (Square::F6, 0.5), (Square::G6, 0.5), (Square::F7, 0.5), (Square::G7, 0.5),
];

/// Central squares whose defenders are rewarded, and how much.
#[rustfmt::skip]
const CENTRAL_SUPPORT_WEIGHTS: [(Square, f32); 8] = [
    (Square::D4, 1.5), (Square::D5, 1.5), (Square::E4, 1.5), (Square::E5, 1.5),
    (Square::C4, 1.0), (Square::C5, 1.0), (Square::F4, 1.0), (Square::F5, 1.0),
];

/// c1, f1, c8, and f8.
const IDEAL_ROOK_SQUARES: Bitboard = Square::C1
    .bitboard()
    .or(Square::F1.bitboard())
    .or(Square::C8.bitboard())
    .or(Square::F8.bitboard());

/// Squares around the center where a minor or major piece is well placed.
const OUTPOSTS: Bitboard = Bitboard::new(0x0000182424180000);

/// Ranks 1, 2, 7, and 8.
const ROOK_RANKS: Bitboard = Bitboard::from_row(0)
    .or(Bitboard::from_row(1))
    .or(Bitboard::from_row(6))
    .or(Bitboard::from_row(7));

/// Files b through e, on ranks 3 through 6.
const PAWN_SUPPORT_ZONE: Bitboard = Bitboard::new(0x00001E1E1E1E0000);

/// How much a piece of `kind` contributes to controlling a key square.
const fn attacker_weight(kind: PieceKind) -> f32 {
    match kind {
        PieceKind::Pawn => 0.1,
        PieceKind::Knight | PieceKind::Bishop => 0.3,
        PieceKind::Rook => 0.5,
        PieceKind::Queen => 0.9,
        PieceKind::King => 0.2,
    }
}

/// Harmony scores for White and Black, in that order.
///
/// Each is the sum of ten independent sub-scores, each truncated to an integer.
/// The pair is never combined into a single number here.
pub(super) fn evaluate(ctx: &EvalContext, config: &EvalConfig) -> (i32, i32) {
    (side(ctx, Color::White, config), side(ctx, Color::Black, config))
}

fn side(ctx: &EvalContext, color: Color, config: &EvalConfig) -> i32 {
    let sub_scores = [
        truncate(color_coordination(ctx, color)),
        truncate(key_square_control(ctx, color)),
        truncate(central_support(ctx, color)),
        truncate(rook_coordination(ctx, color)),
        pawns::structure_score(ctx, color),
        truncate(threat_coordination(ctx, color)),
        truncate(mobility_coordination(ctx, color)),
        truncate(piece_value_awareness(ctx, color)),
        positional_features(ctx, color, config),
        truncate(tactical_utilization(ctx, color)),
    ];

    log::trace!("{} harmony sub-scores: {sub_scores:?}", color.title());

    sub_scores.into_iter().sum()
}

/// How well `color`'s pieces defend and stay close to each other, weighted by their value.
fn color_coordination(ctx: &EvalContext, color: Color) -> f32 {
    let own = ctx.position.color_mask(color);
    let mut score = 0.0;

    for (square, piece) in ctx.position.pieces_of(color) {
        let value = piece.value() as f32;
        let attacks = ctx.attacks(square);

        for (_, defended) in ctx.position.iter_for(attacks & own) {
            score += value * defended.value() as f32;
        }

        for other in own {
            if other != square {
                score += value / (1 + square.distance_chebyshev(other)) as f32;
            }
        }

        if Bitboard::CENTER.contains(square) {
            score += 0.5 * value;
        }

        if (3..=5).contains(&square.relative_rank(color)) {
            score += 0.3 * value;
        }

        score += value * attacks.len() as f32 / 8.0;
    }

    let count = own.len();
    if count > 1 {
        score /= count as f32;
    }

    score
}

/// Weighted control of the squares in and around the center.
pub(super) fn key_square_control(ctx: &EvalContext, color: Color) -> f32 {
    KEY_SQUARE_WEIGHTS
        .iter()
        .map(|&(square, weight)| {
            ctx.position
                .iter_for(ctx.attackers_of(square, color))
                .map(|(_, piece)| weight * attacker_weight(piece.kind()))
                .sum::<f32>()
        })
        .sum()
}

/// Pieces supporting the center, favoring valuable pieces close to it and pieces working in pairs.
fn central_support(ctx: &EvalContext, color: Color) -> f32 {
    let mut score = 0.0;

    for &(square, weight) in &CENTRAL_SUPPORT_WEIGHTS {
        let supporters: Vec<(Square, Piece)> = ctx.position.iter_for(ctx.attackers_of(square, color)).collect();

        for (from, piece) in &supporters {
            score += piece.value() as f32 * weight / (1 + from.distance_chebyshev(square)) as f32;
        }

        for (i, (_, first)) in supporters.iter().enumerate() {
            for (j, (_, second)) in supporters.iter().enumerate() {
                if i != j {
                    score += 0.1 * (first.value() + second.value()) as f32;
                }
            }
        }
    }

    score
}

fn rook_coordination(ctx: &EvalContext, color: Color) -> f32 {
    let rooks = ctx.position.piece_parts(color, PieceKind::Rook);
    let pawns = ctx.position.pawns(color);
    let ideal = rooks & IDEAL_ROOK_SQUARES;
    let mut score = ideal.len() as f32;

    let files = (0..8)
        .filter(|&col| (rooks & ROOK_RANKS).intersects(Bitboard::from_col(col)))
        .count();
    score += 0.5 * files as f32;

    score += 0.2 * (pawns & PAWN_SUPPORT_ZONE).len() as f32;

    let ideal_moves = ctx
        .moves_for(color)
        .iter()
        .filter(|mv| ideal.contains(mv.from()))
        .count();
    score += 0.5 * ideal_moves as f32;

    let harassed = ideal
        .iter()
        .filter(|&square| ctx.position.is_square_attacked(square, color.opponent()))
        .count();
    score -= 0.5 * harassed as f32;

    score
}

/// Bonus for a piece standing where it projects threats.
fn placement_bonus(square: Square, piece: Piece) -> f32 {
    let color = piece.color();

    match piece.kind() {
        PieceKind::Pawn => {
            let rank = square.relative_rank(color);
            if (2..=5).contains(&square.col()) && (3..=6).contains(&rank) {
                0.2
            } else if rank >= 5 {
                0.1
            } else {
                0.0
            }
        }

        PieceKind::King => 0.0,

        _ if Bitboard::CENTER.contains(square) => 0.5,
        _ if OUTPOSTS.contains(square) => 0.3,
        _ => 0.0,
    }
}

fn threat_coordination(ctx: &EvalContext, color: Color) -> f32 {
    ctx.position
        .pieces_of(color)
        .map(|(square, piece)| placement_bonus(square, piece))
        .sum()
}

fn mobility_coordination(ctx: &EvalContext, color: Color) -> f32 {
    ctx.position
        .pieces_of(color)
        .map(|(square, piece)| {
            let reach = if piece.is_pawn() || piece.is_king() {
                0
            } else {
                ctx.attacks(square).len()
            };

            reach as f32 + placement_bonus(square, piece)
        })
        .sum()
}

/// Whether `color`'s pieces target things worth more than themselves, and avoid being targets.
fn piece_value_awareness(ctx: &EvalContext, color: Color) -> f32 {
    let opponent = color.opponent();
    let enemies = ctx.position.color_mask(opponent);
    let mut score = 0.0;

    for (square, piece) in ctx.position.pieces_of(color) {
        for (target_square, target) in ctx.position.iter_for(ctx.attacks(square) & enemies) {
            score += (target.value() - piece.value()) as f32;

            if Bitboard::CENTER.contains(target_square) {
                score += 0.5;
            }
        }

        match piece.kind() {
            PieceKind::Bishop if ctx.position.is_pinned(square) => score -= 0.5,

            PieceKind::Rook => {
                if ctx.position.is_pinned(square) {
                    score -= 0.5;
                }
                if ctx.is_open_file(square) {
                    score += 0.5;
                }
            }

            PieceKind::Queen => {
                if Bitboard::CENTER.contains(square) {
                    score += 1.0;
                }
                if ctx.position.is_square_attacked(square, opponent) {
                    score -= 1.0;
                }
            }

            _ => {}
        }
    }

    score
}

/// Piece-Square table value of `color`'s Pawns and Knights.
fn positional_features(ctx: &EvalContext, color: Color, config: &EvalConfig) -> i32 {
    let total: i32 = ctx
        .position
        .iter_for(ctx.position.kind_mask(PieceKind::Pawn) | ctx.position.kind_mask(PieceKind::Knight))
        .filter(|(_, piece)| piece.color() == color)
        .map(|(square, piece)| Psqt::eval(piece, square))
        .sum();

    config.scale_psqt(total)
}

/// How much `color` is getting out of its pieces right now: pressure exerted, and pressure endured.
fn tactical_utilization(ctx: &EvalContext, color: Color) -> f32 {
    let opponent = color.opponent();
    let own = ctx.position.color_mask(color);
    let mut score = 0.0;

    for (square, _) in ctx.position.pieces_of(color) {
        if ctx.position.is_square_attacked(square, opponent) {
            score += 0.2;
        }

        if ctx.position.is_pinned(square) {
            score += 0.3;
        }

        score += 0.4 * (ctx.attacks(square) & !own).len() as f32;
    }

    if ctx.checkmated(opponent) {
        score += 1.0;
    } else if ctx.in_check(opponent) {
        score += 0.5;
    }

    score
}
