/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, Piece, PieceKind, Square, Table};

/// Piece-Square tables from the [Simplified Evaluation Function](https://www.chessprogramming.org/Simplified_Evaluation_Function).
///
/// Tables are written from White's point of view, with rank 8 on the first line,
/// which matches the square indexing of this crate.
#[rustfmt::skip]
const PAWN: Psqt = Psqt::new([
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     10,  10,  20,  30,  30,  20,  10,  10,
      5,   5,  10,  25,  25,  10,   5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      5,  10,  10, -20, -20,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
]);

#[rustfmt::skip]
const KNIGHT: Psqt = Psqt::new([
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
]);

#[rustfmt::skip]
const BISHOP: Psqt = Psqt::new([
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
]);

#[rustfmt::skip]
const ROOK: Psqt = Psqt::new([
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10,  10,  10,  10,  10,   5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      0,   0,   0,   5,   5,   0,   0,   0,
]);

#[rustfmt::skip]
const QUEEN: Psqt = Psqt::new([
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,  -5,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
]);

#[rustfmt::skip]
const KING: Psqt = Psqt::new([
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
]);

/// A Piece-Square table, holding a positional bonus for one kind of piece on each square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Psqt(Table<i32>);

impl Psqt {
    /// Creates a new [`Psqt`] from values written from White's point of view.
    const fn new(values: [i32; Square::COUNT]) -> Self {
        Self(Table::new(values))
    }

    /// Fetch the table for the provided [`PieceKind`].
    #[inline(always)]
    pub const fn for_kind(kind: PieceKind) -> &'static Self {
        match kind {
            PieceKind::Pawn => &PAWN,
            PieceKind::Knight => &KNIGHT,
            PieceKind::Bishop => &BISHOP,
            PieceKind::Rook => &ROOK,
            PieceKind::Queen => &QUEEN,
            PieceKind::King => &KING,
        }
    }

    /// Fetch the Piece-Square table value for `piece` at `square`.
    ///
    /// Black's pieces read the table with the rank flipped.
    ///
    /// # Example
    /// ```
    /// # use harmony::*;
    /// assert_eq!(Psqt::eval(Piece::WHITE_PAWN, Square::D2), -20);
    /// assert_eq!(Psqt::eval(Piece::BLACK_PAWN, Square::D7), -20);
    /// assert_eq!(Psqt::eval(Piece::WHITE_KNIGHT, Square::E4), 20);
    /// ```
    #[inline(always)]
    pub const fn eval(piece: Piece, square: Square) -> i32 {
        Self::for_kind(piece.kind()).get_relative(square, piece.color())
    }

    /// Get the value of this table at the provided square.
    #[inline(always)]
    pub const fn get(&self, square: Square) -> i32 {
        *self.0.get(square)
    }

    /// Get the value of this table at the provided square, relative to `color`.
    #[inline(always)]
    pub const fn get_relative(&self, square: Square, color: Color) -> i32 {
        self.get(square.relative_to(color))
    }
}

impl fmt::Display for Psqt {
    /// Prints the table as it is written in the code (White's perspective).
    ///
    /// If the alternate formatter is used (`#`), it will print as if from Black's perspective.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = if f.alternate() {
            Color::Black
        } else {
            Color::White
        };

        for row in 0..8 {
            let line = (0..8)
                .map(|col| format!("{:>4}", self.get_relative(Square::new(row, col), color)))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psqt_is_mirrored_for_black() {
        for square in Square::iter() {
            for kind in PieceKind::all() {
                let white = Psqt::eval(Piece::new(Color::White, kind), square);
                let black = Psqt::eval(Piece::new(Color::Black, kind), square.flipped_rank());
                assert_eq!(white, black, "{kind:?} on {square}");
            }
        }
    }

    #[test]
    fn test_start_position_tables_balance() {
        let position = crate::Position::default();
        let total: i32 = position
            .pieces()
            .map(|(square, piece)| Psqt::eval(piece, square) * piece.color().negation_multiplier() as i32)
            .sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn test_display_alternate_flips() {
        let white = format!("{}", Psqt::for_kind(PieceKind::Pawn));
        let black = format!("{:#}", Psqt::for_kind(PieceKind::Pawn));
        assert!(white.starts_with("   0"));
        assert!(black.lines().nth(1).is_some_and(|line| line.contains("-20")));
    }
}
