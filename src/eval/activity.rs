/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Bitboard, Color, EvalConfig};

use super::context::EvalContext;

/// Piece activity balance: mobility and centralization, from White's point of view.
pub(super) fn evaluate(ctx: &EvalContext, config: &EvalConfig) -> f32 {
    let side = |color: Color| {
        config.activity_mobility_weight * ctx.mobility(color) as f32
            + config.activity_centralization_weight * ctx.count_on(color, Bitboard::EXTENDED_CENTER) as f32
            + config.activity_occupancy_weight * ctx.count_on(color, Bitboard::CENTER) as f32
    };

    side(Color::White) - side(Color::Black)
}
