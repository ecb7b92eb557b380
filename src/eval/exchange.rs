/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Bitboard, Color, Piece, PieceKind, Square};

use super::context::EvalContext;

/// Knight outposts rewarded when weighing an exchange.
const KNIGHT_OUTPOSTS: [Square; 4] = [Square::C3, Square::F3, Square::C6, Square::F6];

/// Long-diagonal Bishop posts rewarded when weighing an exchange.
const BISHOP_POSTS: [Square; 4] = [Square::B2, Square::G2, Square::B7, Square::G7];

/// Potential gains from `color` trading pieces with whatever it currently attacks.
pub(super) fn evaluate(ctx: &EvalContext, color: Color) -> f32 {
    let enemies = ctx.position.color_mask(color.opponent());
    let mut score = 0.0;

    for (square, attacker) in ctx.position.pieces_of(color) {
        let bonus = positional_bonus(ctx, square, attacker);

        for (_, target) in ctx.position.iter_for(ctx.attacks(square) & enemies) {
            score += (target.value() - attacker.value()) as f32 + bonus;
        }
    }

    score
}

/// Bonus for an attacker standing on a square that suits it.
fn positional_bonus(ctx: &EvalContext, square: Square, piece: Piece) -> f32 {
    match piece.kind() {
        PieceKind::Pawn if Bitboard::CENTER.contains(square) => 0.5,
        PieceKind::Knight if KNIGHT_OUTPOSTS.contains(&square) => 0.5,
        PieceKind::Bishop if BISHOP_POSTS.contains(&square) => 0.5,
        PieceKind::Rook if ctx.is_open_file(square) => 1.0,
        PieceKind::Queen if Bitboard::CENTER.contains(square) => 1.0,
        _ => 0.0,
    }
}
