/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, PieceKind};

use super::context::EvalContext;

/// Total material value of `color`'s pieces. Kings are worth nothing.
pub(super) fn evaluate(ctx: &EvalContext, color: Color) -> i32 {
    PieceKind::all().into_iter().fold(0, |total, kind| {
        total + ctx.position.count(color, kind) as i32 * kind.value()
    })
}
