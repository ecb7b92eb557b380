/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{king_attacks, pawn_start_row, Bitboard, Color, EvalConfig, Square};

use super::context::EvalContext;

/// Weighted pawn structure balance, from White's point of view.
pub(super) fn evaluate(ctx: &EvalContext, config: &EvalConfig) -> f32 {
    let delta = |f: fn(&EvalContext, Color) -> i32| (f(ctx, Color::White) - f(ctx, Color::Black)) as f32;

    config.pawn_structure_weight * delta(structure_score)
        + config.pawn_chain_weight * delta(chain_strength)
        + config.pawn_attack_weight * delta(attack_count)
        + config.pawn_break_weight * delta(breaks)
}

/// Files directly beside the file of `square`.
#[inline(always)]
fn adjacent_files(square: Square) -> Bitboard {
    let col = square.col();
    let mut files = Bitboard::EMPTY_BOARD;
    if col > 0 {
        files.set(Bitboard::from_col(col - 1));
    }
    if col < 7 {
        files.set(Bitboard::from_col(col + 1));
    }
    files
}

/// Penalties for `color`'s isolated, doubled, and backward Pawns.
///
/// A Pawn is backward when it has friendly Pawns on adjacent files and every one of them is further advanced.
pub(super) fn structure_score(ctx: &EvalContext, color: Color) -> i32 {
    let pawns = ctx.position.pawns(color);
    let mut score = 0;

    for square in pawns {
        let neighbours = pawns & adjacent_files(square);

        if neighbours.is_empty() {
            score -= 1;
        }

        let file = pawns & Bitboard::from_col(square.col());
        if file.len() > 1 {
            score -= 1;
        }

        let rank = square.relative_rank(color);
        if neighbours.is_nonempty() && neighbours.iter().all(|n| n.relative_rank(color) > rank) {
            score -= 1;
        }
    }

    score
}

/// Splits `color`'s Pawns into chains: groups where every Pawn touches another, including diagonally.
pub(super) fn chains(ctx: &EvalContext, color: Color) -> Vec<Bitboard> {
    let mut remaining = ctx.position.pawns(color);
    let mut chains = Vec::new();

    while let Some(seed) = remaining.pop_lsb() {
        let mut chain = seed.bitboard();
        let mut frontier = chain;

        while let Some(square) = frontier.pop_lsb() {
            let touching = king_attacks(square) & remaining;
            remaining.clear(touching);
            chain.set(touching);
            frontier.set(touching);
        }

        chains.push(chain);
    }

    chains
}

/// Number of `color`'s Pawns that belong to a chain of at least two.
pub(super) fn chain_strength(ctx: &EvalContext, color: Color) -> i32 {
    chains(ctx, color)
        .into_iter()
        .map(|chain| chain.len())
        .filter(|&len| len >= 2)
        .sum::<usize>() as i32
}

/// Number of squares attacked by `color`'s Pawns, counted once per Pawn.
pub(super) fn attack_count(ctx: &EvalContext, color: Color) -> i32 {
    ctx.position
        .pawns(color)
        .iter()
        .map(|square| ctx.attacks(square).len())
        .sum::<usize>() as i32
}

/// Number of `color`'s Pawns still able to make their double step.
pub(super) fn breaks(ctx: &EvalContext, color: Color) -> i32 {
    ctx.position
        .pawns(color)
        .iter()
        .filter(|square| square.row() == pawn_start_row(color))
        .filter(|square| {
            square
                .forward_by(color, 2)
                .is_some_and(|double| ctx.position.pseudo_legal_moves(*square).contains(double))
        })
        .count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn with_ctx<T>(fen: &str, f: impl FnOnce(&EvalContext) -> T) -> T {
        let position = Position::from_fen(fen).unwrap();
        f(&EvalContext::new(&position))
    }

    #[test]
    fn test_start_position_pawns() {
        with_ctx(crate::FEN_STARTPOS, |ctx| {
            assert_eq!(structure_score(ctx, Color::White), 0);
            assert_eq!(chain_strength(ctx, Color::White), 8);
            assert_eq!(attack_count(ctx, Color::White), 14);
            assert_eq!(breaks(ctx, Color::Black), 8);
            assert_eq!(evaluate(ctx, &EvalConfig::default()), 0.0);
        });
    }

    #[test]
    fn test_isolated_and_doubled() {
        // a-pawn is isolated; the two e-pawns are doubled and isolated
        with_ctx("4k3/8/8/8/4P3/8/P3P3/4K3", |ctx| {
            assert_eq!(structure_score(ctx, Color::White), -1 - 2 - 2);
        });
    }

    #[test]
    fn test_backward_pawn() {
        // d3 trails both of its neighbours
        with_ctx("4k3/8/8/8/2P1P3/3P4/8/4K3", |ctx| {
            assert_eq!(structure_score(ctx, Color::White), -1);
        });

        // Same shape for Black, seen from the other side of the board
        with_ctx("4k3/8/3p4/2p1p3/8/8/8/4K3", |ctx| {
            assert_eq!(structure_score(ctx, Color::Black), -1);
        });
    }

    #[test]
    fn test_chains() {
        // b2-c3-d4 is one chain; g2 and h5 stand alone
        with_ctx("4k3/8/8/7P/3P4/2P5/1P4P1/4K3", |ctx| {
            let chains = chains(ctx, Color::White);
            assert_eq!(chains.len(), 3);
            assert_eq!(chain_strength(ctx, Color::White), 3);
        });
    }

    #[test]
    fn test_blocked_breaks() {
        // The e-pawn is blocked on e3; the d-pawn has already moved
        with_ctx("4k3/8/8/8/8/3Pn3/4P3/4K3", |ctx| {
            assert_eq!(breaks(ctx, Color::White), 0);
        });
    }
}
