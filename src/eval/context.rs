/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Bitboard, Color, Move, PieceKind, Position, Square, Table};

/// Everything the factor evaluators need to know about a position, computed once up front.
#[derive(Debug, Clone)]
pub(crate) struct EvalContext<'a> {
    pub position: &'a Position,

    /// Squares attacked (or defended) by the piece on each square. Empty squares attack nothing.
    pub attacks: Table<Bitboard>,

    /// Union of [`EvalContext::attacks`] over every piece of each color.
    pub attacked_by: [Bitboard; Color::COUNT],

    pub kings: [Option<Square>; Color::COUNT],
    pub legal_moves: [Vec<Move>; Color::COUNT],
    pub in_check: [bool; Color::COUNT],
    pub checkmated: [bool; Color::COUNT],
}

impl<'a> EvalContext<'a> {
    pub fn new(position: &'a Position) -> Self {
        let attacks = Table::from_fn(|square| position.attacks_from(square));

        let attacked_by = Color::all().map(|color| {
            position
                .pieces_of(color)
                .fold(Bitboard::EMPTY_BOARD, |acc, (square, _)| acc | attacks[square])
        });

        let kings = Color::all().map(|color| position.king_square(color));
        let legal_moves = Color::all().map(|color| position.legal_moves(color));
        let in_check = Color::all().map(|color| position.is_in_check(color));
        let checkmated = Color::all().map(|color| in_check[color] && legal_moves[color].is_empty());

        log::trace!(
            "Built evaluation context for {}: {} white moves, {} black moves",
            position.to_fen(),
            legal_moves[Color::White].len(),
            legal_moves[Color::Black].len()
        );

        Self {
            position,
            attacks,
            attacked_by,
            kings,
            legal_moves,
            in_check,
            checkmated,
        }
    }

    #[inline(always)]
    pub fn attacks(&self, square: Square) -> Bitboard {
        self.attacks[square]
    }

    /// Every square holding a `by` piece that attacks (or defends) `square`.
    #[inline(always)]
    pub fn attackers_of(&self, square: Square, by: Color) -> Bitboard {
        self.position
            .color_mask(by)
            .iter()
            .filter(|&from| self.attacks[from].contains(square))
            .collect()
    }

    #[inline(always)]
    pub fn king_for(&self, color: Color) -> Option<Square> {
        self.kings[color]
    }

    /// Colors with no King on the board.
    pub fn missing_kings(&self) -> impl Iterator<Item = Color> + '_ {
        Color::all().into_iter().filter(|&color| self.kings[color].is_none())
    }

    #[inline(always)]
    pub fn moves_for(&self, color: Color) -> &[Move] {
        &self.legal_moves[color]
    }

    #[inline(always)]
    pub fn mobility(&self, color: Color) -> usize {
        self.legal_moves[color].len()
    }

    #[inline(always)]
    pub fn in_check(&self, color: Color) -> bool {
        self.in_check[color]
    }

    #[inline(always)]
    pub fn checkmated(&self, color: Color) -> bool {
        self.checkmated[color]
    }

    /// Number of `color`'s pieces standing on `mask`.
    #[inline(always)]
    pub fn count_on(&self, color: Color, mask: Bitboard) -> usize {
        (self.position.color_mask(color) & mask).len()
    }

    /// A file is open when no Pawn of either color stands on it.
    #[inline(always)]
    pub fn is_open_file(&self, square: Square) -> bool {
        let file = Bitboard::from_col(square.col());
        !file.intersects(self.position.kind_mask(PieceKind::Pawn))
    }

    /// A file is semi-open for `color` when no piece of `color`'s opponent stands on it.
    #[inline(always)]
    pub fn is_semi_open_file(&self, square: Square, color: Color) -> bool {
        let file = Bitboard::from_col(square.col());
        !file.intersects(self.position.color_mask(color.opponent()))
    }
}
