/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Bitboard, Color, PieceKind};

use super::context::EvalContext;

/// `color`'s grip on the four central squares and the ring around them.
pub(super) fn evaluate(ctx: &EvalContext, color: Color) -> f32 {
    let opponent = color.opponent();
    let mut score = 0.0;

    for square in Bitboard::CENTER {
        score += 0.5 * ctx.attackers_of(square, color).len() as f32;
    }

    score += (ctx.attacked_by[color] & Bitboard::EXTENDED_CENTER).len() as f32;

    let central_pawns = ctx.position.piece_parts(color, PieceKind::Pawn) & Bitboard::CENTER;
    score += 0.25 * central_pawns.len() as f32;

    let contested = ctx.position.color_mask(color) & Bitboard::CENTER & ctx.attacked_by[opponent];
    score += 0.5 * contested.len() as f32;

    score
}
