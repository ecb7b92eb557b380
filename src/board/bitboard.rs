/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, Not},
};

use super::Square;

/// A [bitboard](https://www.chessprogramming.org/Bitboards) is a set of squares, one bit per square.
///
/// Bit `i` corresponds to the [`Square`] with index `i`, so bit `0` is `a8` and bit `63` is `h1`.
/// Iteration yields squares in ascending index order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    pub const FILE_A: Self = Self(0x0101010101010101);
    pub const EMPTY_BOARD: Self = Self(0x0000000000000000);
    pub const FULL_BOARD: Self = Self(0xFFFFFFFFFFFFFFFF);

    /// `d5`, `e5`, `d4` and `e4`.
    pub const CENTER: Self = Self(0x0000001818000000);

    /// The 4x4 block from `c3` to `f6`: the center plus the ring of twelve squares around it.
    pub const EXTENDED_CENTER: Self = Self(0x00003C3C3C3C0000);

    /// The fourteen squares around the center that the evaluator rewards occupying.
    ///
    /// `c6 d6 e6 f6 c5 f5 g5 h5 c4 f4 c3 d3 e3 f3`
    pub const KEY_SQUARES: Self = Self(0x00003C24E43C0000);

    /// Creates a new [`Bitboard`] from the provided bits.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Creates a new [`Bitboard`] containing only `square`.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Bitboard, Square};
    /// let board = Bitboard::from_square(Square::E4);
    /// assert_eq!(board.population(), 1);
    /// assert!(board.contains(Square::E4));
    /// ```
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.index())
    }

    /// Creates a [`Bitboard`] of every square in column `col`.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Bitboard, Square};
    /// let e_file = Bitboard::from_col(4);
    /// assert!(e_file.contains(Square::E1));
    /// assert!(e_file.contains(Square::E8));
    /// assert_eq!(e_file.population(), 8);
    /// ```
    #[inline(always)]
    pub const fn from_col(col: u8) -> Self {
        Self(Self::FILE_A.0 << col)
    }

    /// Creates a [`Bitboard`] of every square in row `row`.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Bitboard, Square};
    /// let row = Bitboard::from_row(0);
    /// assert!(row.contains(Square::A8));
    /// assert!(!row.contains(Square::A1));
    /// ```
    #[inline(always)]
    pub const fn from_row(row: u8) -> Self {
        Self(0xFF << (row * 8))
    }

    /// Fetches the inner bits.
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Returns `true` if no square is set.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if at least one square is set.
    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns `true` if `square` is in this set.
    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & (1 << square.index()) != 0
    }

    /// Returns `true` if `self` and `other` share at least one square.
    #[inline(always)]
    pub fn intersects(&self, other: impl Into<Self>) -> bool {
        self.0 & other.into().0 != 0
    }

    /// Adds the squares of `other` to this set.
    #[inline(always)]
    pub fn set(&mut self, other: impl Into<Self>) {
        self.0 |= other.into().0;
    }

    /// Removes the squares of `other` from this set.
    #[inline(always)]
    pub fn clear(&mut self, other: impl Into<Self>) {
        self.0 &= !other.into().0;
    }

    /// The lowest-indexed square in the set, if any.
    #[inline(always)]
    pub fn lsb(&self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Some(Square::from_index_unchecked(self.0.trailing_zeros() as usize))
        }
    }

    /// Removes and returns the lowest-indexed square in the set, if any.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let lsb = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(lsb)
    }

    /// An iterator over every square in the set, in ascending index order.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Bitboard, Square};
    /// let board = Bitboard::from_square(Square::H1) | Square::A8;
    /// let squares: Vec<_> = board.iter().collect();
    /// assert_eq!(squares, vec![Square::A8, Square::H1]);
    /// ```
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bitboard: *self }
    }

    /// Number of squares in the set.
    #[inline(always)]
    pub const fn population(&self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Alias for [`Bitboard::population`], as a `usize`.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// `const` version of [`Bitboard::bitor`].
    #[inline(always)]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl FromIterator<Square> for Bitboard {
    /// A [`Bitboard`] can be created from an iterator over [`Square`]s.
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |bb, sq| bb | sq)
    }
}

macro_rules! impl_bitwise_op {
    ($op:tt, $op_assign:tt, $func:ident, $func_assign:ident) => {
        impl<T> std::ops::$op<T> for Bitboard
        where
            Self: From<T>,
        {
            type Output = Self;
            #[inline(always)]
            fn $func(self, rhs: T) -> Self::Output {
                Self(self.0.$func(Self::from(rhs).0))
            }
        }

        impl<T> std::ops::$op_assign<T> for Bitboard
        where
            Self: From<T>,
        {
            #[inline(always)]
            fn $func_assign(&mut self, rhs: T) {
                self.0.$func_assign(Self::from(rhs).0);
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign);
impl_bitwise_op!(BitXor, BitXorAssign, bitxor, bitxor_assign);

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl Index<Square> for Bitboard {
    type Output = bool;

    /// Wrapper over [`Bitboard::contains`].
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        if self.contains(index) {
            &true
        } else {
            &false
        }
    }
}

impl From<Square> for Bitboard {
    /// Wrapper for [`Bitboard::from_square`].
    #[inline(always)]
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}

impl From<u64> for Bitboard {
    /// Wrapper for [`Bitboard::new`].
    #[inline(always)]
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl Default for Bitboard {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY_BOARD
    }
}

impl fmt::Display for Bitboard {
    /// Prints an 8x8 grid, row `0` (rank 8) first, with `X` for set squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(136);

        for row in 0..8 {
            for col in 0..8 {
                let occupant = if self.contains(Square::new(row, col)) {
                    'X'
                } else {
                    '.'
                };

                board += &format!("{occupant} ");
            }
            board += "\n";
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for row in 0..8 {
            board += &format!("{}| ", 8 - row);

            for col in 0..8 {
                let occupant = if self.contains(Square::new(row, col)) {
                    'X'
                } else {
                    '.'
                };

                board += &format!("{occupant} ");
            }
            board += "\n";
        }
        board += " +----------------\n   a b c d e f g h";

        write!(f, "{board}")
    }
}

/// An iterator over all set bits in a [`Bitboard`].
///
/// See [`Bitboard::iter`].
pub struct BitboardIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bitboard.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bitboard.len();
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {
    #[inline(always)]
    fn len(&self) -> usize {
        self.bitboard.len()
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bitboard: self }
    }
}

impl IntoIterator for &Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bitboard: *self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitboard_to_string() {
        let expected = ". . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . X X . . . \n\
                        . . . X X . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n";
        assert_eq!(Bitboard::CENTER.to_string(), expected);

        let board = Bitboard::from_row(6) | Bitboard::from_col(2);
        let expected = ". . X . . . . . \n\
                        . . X . . . . . \n\
                        . . X . . . . . \n\
                        . . X . . . . . \n\
                        . . X . . . . . \n\
                        . . X . . . . . \n\
                        X X X X X X X X \n\
                        . . X . . . . . \n";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_named_sets() {
        let center: Vec<usize> = Bitboard::CENTER.iter().map(|sq| sq.index()).collect();
        assert_eq!(center, vec![27, 28, 35, 36]);

        let key: Vec<usize> = Bitboard::KEY_SQUARES.iter().map(|sq| sq.index()).collect();
        assert_eq!(
            key,
            vec![18, 19, 20, 21, 26, 29, 30, 31, 34, 37, 42, 43, 44, 45]
        );

        assert_eq!(Bitboard::EXTENDED_CENTER.population(), 16);
        assert!(Bitboard::EXTENDED_CENTER.contains(Square::C3));
        assert!(Bitboard::EXTENDED_CENTER.contains(Square::F6));
        assert_eq!(Bitboard::EXTENDED_CENTER & Bitboard::CENTER, Bitboard::CENTER);
    }

    #[test]
    fn test_set_and_clear() {
        let mut board = Bitboard::default();
        board.set(Square::B2);
        board.set(Square::G7);
        assert_eq!(board.population(), 2);
        board.clear(Square::B2);
        assert_eq!(board.lsb(), Some(Square::G7));
        assert!(!board[Square::B2]);
        assert!(board[Square::G7]);
    }

    #[test]
    fn test_collect_from_squares() {
        let board: Bitboard = [Square::A8, Square::H1, Square::A8].into_iter().collect();
        assert_eq!(board.len(), 2);
        assert_eq!(board.iter().len(), 2);
        assert_eq!(Bitboard::FILE_A ^ Bitboard::FULL_BOARD, !Bitboard::FILE_A);
    }
}
