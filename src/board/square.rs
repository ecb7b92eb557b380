/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use anyhow::{bail, Result};

use super::{Bitboard, Color};

/// Represents a single square on an `8x8` chess board.
///
/// Squares are indexed `0..64` in the order the rank descriptors of a FEN string are read:
/// index `0` is `a8`, index `7` is `h8`, and index `63` is `h1`.
/// The row of a square is `index / 8` and its column is `index % 8`,
/// so row `0` holds Black's back rank in the standard setup and White's pieces begin on rows `6` and `7`.
///
/// ```text
///       a  b  c  d  e  f  g  h
///  8 |  0  1  2  3  4  5  6  7
///  7 |  8  9 10 11 12 13 14 15
///  ...
///  1 | 56 57 58 59 60 61 62 63
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const A8: Self = Self(0);
    pub const B8: Self = Self(1);
    pub const C8: Self = Self(2);
    pub const D8: Self = Self(3);
    pub const E8: Self = Self(4);
    pub const F8: Self = Self(5);
    pub const G8: Self = Self(6);
    pub const H8: Self = Self(7);

    pub const A7: Self = Self(8);
    pub const B7: Self = Self(9);
    pub const C7: Self = Self(10);
    pub const D7: Self = Self(11);
    pub const E7: Self = Self(12);
    pub const F7: Self = Self(13);
    pub const G7: Self = Self(14);
    pub const H7: Self = Self(15);

    pub const A6: Self = Self(16);
    pub const B6: Self = Self(17);
    pub const C6: Self = Self(18);
    pub const D6: Self = Self(19);
    pub const E6: Self = Self(20);
    pub const F6: Self = Self(21);
    pub const G6: Self = Self(22);
    pub const H6: Self = Self(23);

    pub const A5: Self = Self(24);
    pub const B5: Self = Self(25);
    pub const C5: Self = Self(26);
    pub const D5: Self = Self(27);
    pub const E5: Self = Self(28);
    pub const F5: Self = Self(29);
    pub const G5: Self = Self(30);
    pub const H5: Self = Self(31);

    pub const A4: Self = Self(32);
    pub const B4: Self = Self(33);
    pub const C4: Self = Self(34);
    pub const D4: Self = Self(35);
    pub const E4: Self = Self(36);
    pub const F4: Self = Self(37);
    pub const G4: Self = Self(38);
    pub const H4: Self = Self(39);

    pub const A3: Self = Self(40);
    pub const B3: Self = Self(41);
    pub const C3: Self = Self(42);
    pub const D3: Self = Self(43);
    pub const E3: Self = Self(44);
    pub const F3: Self = Self(45);
    pub const G3: Self = Self(46);
    pub const H3: Self = Self(47);

    pub const A2: Self = Self(48);
    pub const B2: Self = Self(49);
    pub const C2: Self = Self(50);
    pub const D2: Self = Self(51);
    pub const E2: Self = Self(52);
    pub const F2: Self = Self(53);
    pub const G2: Self = Self(54);
    pub const H2: Self = Self(55);

    pub const A1: Self = Self(56);
    pub const B1: Self = Self(57);
    pub const C1: Self = Self(58);
    pub const D1: Self = Self(59);
    pub const E1: Self = Self(60);
    pub const F1: Self = Self(61);
    pub const G1: Self = Self(62);
    pub const H1: Self = Self(63);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    /// Mask for the column bits of the index.
    const COL_MASK: u8 = 0b0000_0111;

    /// Mask for the row bits of the index.
    const ROW_MASK: u8 = 0b0011_1000;

    /// Returns an iterator over all 64 squares, in ascending index order.
    ///
    /// # Example
    /// ```
    /// # use harmony::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A8);
    /// assert_eq!(iter.last().unwrap(), Square::H1);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from a row and a column, both in `[0, 7]`.
    ///
    /// Callers outside the crate go through [`Square::from_index`].
    #[inline(always)]
    pub(crate) const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8, "Square row and column must be in [0, 7]");
        Self(row << 3 | col)
    }

    /// Creates a new [`Square`] from an index, failing if the index is not in `[0, 63]`.
    ///
    /// # Example
    /// ```
    /// # use harmony::Square;
    /// assert_eq!(Square::from_index(36).unwrap(), Square::E4);
    /// assert!(Square::from_index(64).is_err());
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index > Self::MAX as usize {
            bail!(
                "Invalid index for Square: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }

        Ok(Self(index as u8))
    }

    /// Creates a new [`Square`] from an index, without checking its bounds.
    ///
    /// # Panics
    /// If `index` is greater than `63` and debug assertions are enabled.
    #[inline(always)]
    pub(crate) const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "Square index must be in [0, 63]");
        Self(index as u8)
    }

    /// Fetches the row (`index / 8`) of this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use harmony::Square;
    /// assert_eq!(Square::A8.row(), 0);
    /// assert_eq!(Square::E2.row(), 6);
    /// ```
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        (self.0 & Self::ROW_MASK) >> 3
    }

    /// Fetches the column (`index % 8`) of this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use harmony::Square;
    /// assert_eq!(Square::A8.col(), 0);
    /// assert_eq!(Square::E2.col(), 4);
    /// ```
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 & Self::COL_MASK
    }

    /// Returns this [`Square`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Fetches the inner index value of this [`Square`].
    #[inline(always)]
    pub const fn inner(&self) -> u8 {
        self.0
    }

    /// Reflects this [`Square`] across the horizontal midline of the board, keeping its column.
    ///
    /// # Example
    /// ```
    /// # use harmony::Square;
    /// assert_eq!(Square::A1.flipped_rank(), Square::A8);
    /// assert_eq!(Square::C4.flipped_rank(), Square::C5);
    /// ```
    #[inline(always)]
    pub const fn flipped_rank(self) -> Self {
        Self(self.0 ^ Self::ROW_MASK)
    }

    /// Maps a square named from White's point of view onto `color`'s side of the board.
    ///
    /// White's squares are returned unchanged. Black's are reflected with [`Square::flipped_rank`].
    ///
    /// # Example
    /// ```
    /// # use harmony::{Color, Square};
    /// assert_eq!(Square::F1.relative_to(Color::White), Square::F1);
    /// assert_eq!(Square::F1.relative_to(Color::Black), Square::F8);
    /// ```
    #[inline(always)]
    pub const fn relative_to(self, color: Color) -> Self {
        match color {
            Color::White => self,
            Color::Black => self.flipped_rank(),
        }
    }

    /// Returns how far up the board this [`Square`] is from `color`'s point of view.
    ///
    /// `0` is `color`'s own back rank and `7` is the opponent's back rank.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Color, Square};
    /// assert_eq!(Square::E2.relative_rank(Color::White), 1);
    /// assert_eq!(Square::E2.relative_rank(Color::Black), 6);
    /// ```
    #[inline(always)]
    pub const fn relative_rank(&self, color: Color) -> u8 {
        match color {
            Color::White => 7 - self.row(),
            Color::Black => self.row(),
        }
    }

    /// Computes the [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance) between two squares.
    ///
    /// This is the number of moves a King would need to travel from `self` to `other`.
    ///
    /// # Example
    /// ```
    /// # use harmony::Square;
    /// assert_eq!(Square::C5.distance_chebyshev(Square::C5), 0);
    /// assert_eq!(Square::C5.distance_chebyshev(Square::B4), 1);
    /// assert_eq!(Square::A1.distance_chebyshev(Square::H8), 7);
    /// ```
    #[inline(always)]
    pub const fn distance_chebyshev(&self, other: Self) -> u8 {
        let rows = self.row().abs_diff(other.row());
        let cols = self.col().abs_diff(other.col());
        if rows > cols {
            rows
        } else {
            cols
        }
    }

    /// Attempt to offset this [`Square`] by a row and a column delta.
    ///
    /// Returns `None` if the result would leave the board, so moves can never wrap around an edge.
    ///
    /// # Example
    /// ```
    /// # use harmony::Square;
    /// assert_eq!(Square::C4.offset(-1, 1), Some(Square::D5));
    /// assert_eq!(Square::A8.offset(-1, 0), None);
    /// assert_eq!(Square::H4.offset(0, 1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, row_delta: i8, col_delta: i8) -> Option<Self> {
        let row = self.row() as i8 + row_delta;
        let col = self.col() as i8 + col_delta;

        if row < 0 || row > 7 || col < 0 || col > 7 {
            return None;
        }

        Some(Self::new(row as u8, col as u8))
    }

    /// Moves this [`Square`] `n` rows toward `color`'s opponent, if possible.
    ///
    /// White advances toward row `0` and Black toward row `7`.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Color, Square};
    /// assert_eq!(Square::C4.forward_by(Color::White, 1), Some(Square::C5));
    /// assert_eq!(Square::C4.forward_by(Color::Black, 1), Some(Square::C3));
    /// assert_eq!(Square::C8.forward_by(Color::White, 1), None);
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(-(n as i8) * color.negation_multiplier(), 0)
    }

    /// Alias for [`Bitboard::from_square`].
    #[inline(always)]
    pub const fn bitboard(&self) -> Bitboard {
        Bitboard::from_square(*self)
    }

    /// Converts this [`Square`] to its algebraic name.
    ///
    /// # Example
    /// ```
    /// # use harmony::Square;
    /// assert_eq!(Square::A8.to_uci(), "a8");
    /// assert_eq!(Square::E4.to_uci(), "e4");
    /// ```
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// The file letter (`a` through `h`) of this [`Square`].
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.col()) as char
    }

    /// The rank digit (`1` through `8`) of this [`Square`].
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        (b'8' - self.row()) as char
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    /// [`Square`] can be used to index into a list of 64 elements.
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    /// [`Square`] can be used to mutably index into a list of 64 elements.
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    /// Calls [`Square::to_uci`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_uci().fmt(f)
    }
}

impl fmt::Debug for Square {
    /// Displays the algebraic name and the internal index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_uci(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_col_round_trip() {
        for square in Square::iter() {
            assert_eq!(Square::new(square.row(), square.col()), square);
            assert_eq!(square.row() as usize * 8 + square.col() as usize, square.index());
        }
    }

    #[test]
    fn test_named_constants_match_orientation() {
        assert_eq!(Square::A8.index(), 0);
        assert_eq!(Square::H8.index(), 7);
        assert_eq!(Square::A1.index(), 56);
        assert_eq!(Square::H1.index(), 63);

        // d5, e5, d4, e4
        assert_eq!(Square::D5.index(), 27);
        assert_eq!(Square::E5.index(), 28);
        assert_eq!(Square::D4.index(), 35);
        assert_eq!(Square::E4.index(), 36);
    }

    #[test]
    fn test_uci_names() {
        assert_eq!(Square::A8.to_uci(), "a8");
        assert_eq!(Square::H1.to_string(), "h1");
        for square in Square::iter() {
            let name = square.to_uci();
            assert_eq!(name.len(), 2);
            assert_eq!(name.chars().next(), Some(square.file_char()));
            assert_eq!(name.chars().nth(1), Some(square.rank_char()));
        }
    }

    #[test]
    fn test_offset_never_wraps() {
        assert_eq!(Square::H5.offset(0, 1), None);
        assert_eq!(Square::A5.offset(0, -1), None);
        assert_eq!(Square::A1.offset(1, 0), None);
        assert_eq!(Square::E4.offset(-2, 1), Some(Square::F6));
    }

    #[test]
    fn test_relative_rank_is_symmetric() {
        for square in Square::iter() {
            assert_eq!(
                square.relative_rank(Color::White),
                square.flipped_rank().relative_rank(Color::Black)
            );
        }
    }

    #[test]
    fn test_from_index_rejects_out_of_range() {
        assert!(Square::from_index(63).is_ok());
        assert!(Square::from_index(64).is_err());
        assert!(Square::from_index(1000).is_err());
    }
}
