/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Color, Move, Position};

/// Counts the leaf nodes of the legal move tree rooted at `position`, with `color` to move first.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves
/// rather than making them and recursing again.
///
/// Since moves carry no metadata, castling, en passant, and promotion are never generated,
/// so counts only match published perft results up to the depth where those moves first appear.
///
/// # Example
/// ```
/// # use harmony::*;
/// let position = Position::default();
/// assert_eq!(perft(&position, Color::White, 2), 400);
/// ```
pub fn perft(position: &Position, color: Color, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves(color);

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if depth == 1 {
        return moves.len() as u64;
    }

    moves.into_iter().fold(0, |nodes, mv| {
        nodes + perft(&position.with_move_made(mv), color.opponent(), depth - 1)
    })
}

/// Performs a [`perft`], returning the number of nodes reachable after each move available at the root.
pub fn splitperft(position: &Position, color: Color, depth: usize) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    position
        .legal_moves(color)
        .into_iter()
        .map(|mv| {
            let nodes = perft(&position.with_move_made(mv), color.opponent(), depth - 1);
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitperft_sums_to_perft() {
        let position = Position::default();
        let split = splitperft(&position, Color::White, 3);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8902);
    }

    #[test]
    fn test_perft_depth_zero() {
        assert_eq!(perft(&Position::default(), Color::Black, 0), 1);
        assert!(splitperft(&Position::default(), Color::Black, 0).is_empty());
    }
}
