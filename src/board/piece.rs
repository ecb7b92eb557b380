/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Not},
};

use anyhow::{bail, Result};

/// One of the two sides of a chess game.
///
/// Evaluation scores are always computed from White's point of view first, so [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Creates a new [`Color`] from a `bool`, where `false = White`.
    ///
    /// # Example
    /// ```
    /// # use harmony::Color;
    /// assert_eq!(Color::from_bool(false), Color::White);
    /// assert_eq!(Color::from_bool(true), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn from_bool(is_black: bool) -> Self {
        if is_black {
            Self::Black
        } else {
            Self::White
        }
    }

    /// Returns `true` if this [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns a multiplier for negating numbers relative to this color.
    ///
    /// # Example
    /// ```
    /// # use harmony::Color;
    /// assert_eq!(Color::White.negation_multiplier(), 1);
    /// assert_eq!(Color::Black.negation_multiplier(), -1);
    /// ```
    #[inline(always)]
    pub const fn negation_multiplier(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Returns the other side.
    ///
    /// # Example
    /// ```
    /// # use harmony::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `usize`, `0` for White and `1` for Black.
    ///
    /// # Example
    /// ```
    /// # use harmony::Color;
    /// assert_eq!(Color::White.index(), 0);
    /// assert_eq!(Color::Black.index(), 1);
    /// ```
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Determines the owner of a piece character from its case: uppercase is White.
    ///
    /// # Example
    /// ```
    /// # use harmony::Color;
    /// assert_eq!(Color::from_case('N'), Color::White);
    /// assert_eq!(Color::from_case('n'), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn from_case(c: char) -> Self {
        Self::from_bool(c.is_ascii_lowercase())
    }

    /// The side-to-move character of this [`Color`].
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Alias for [`Color::to_uci`], as a string slice.
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::White => "w",
            Self::Black => "b",
        }
    }

    /// Lowercase name of this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    /// Capitalized name of this [`Color`], as printed in reports.
    #[inline(always)]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl Not for Color {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

/// The kind of a chess piece, without an owner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all six piece kinds, starting with the Pawn.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// Returns this [`PieceKind`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Material value of this [`PieceKind`], in pawns.
    ///
    /// The King has no material value.
    ///
    /// # Example
    /// ```
    /// # use harmony::PieceKind;
    /// assert_eq!(PieceKind::Pawn.value(), 1);
    /// assert_eq!(PieceKind::Bishop.value(), 3);
    /// assert_eq!(PieceKind::Queen.value(), 9);
    /// assert_eq!(PieceKind::King.value(), 0);
    /// ```
    #[inline(always)]
    pub const fn value(&self) -> i32 {
        match self {
            Self::Pawn => 1,
            Self::Knight => 3,
            Self::Bishop => 3,
            Self::Rook => 5,
            Self::Queen => 9,
            Self::King => 0,
        }
    }

    /// Returns `true` if this kind moves along rays.
    #[inline(always)]
    pub const fn is_slider(&self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }

    /// Returns `true` for Knights and Bishops.
    #[inline(always)]
    pub const fn is_minor(&self) -> bool {
        matches!(self, Self::Knight | Self::Bishop)
    }

    /// Creates a [`PieceKind`] from a piece character, ignoring case.
    ///
    /// # Example
    /// ```
    /// # use harmony::PieceKind;
    /// assert_eq!(PieceKind::from_uci('q').unwrap(), PieceKind::Queen);
    /// assert_eq!(PieceKind::from_uci('Q').unwrap(), PieceKind::Queen);
    /// assert!(PieceKind::from_uci('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }

    /// Lowercase name of this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Lowercase character of this [`PieceKind`].
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Alias for [`PieceKind::to_uci`], as a string slice.
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pawn => "p",
            Self::Knight => "n",
            Self::Bishop => "b",
            Self::Rook => "r",
            Self::Queen => "q",
            Self::King => "k",
        }
    }
}

/// A piece owned by one side.
///
/// Internally, the color occupies bit `3` and the kind the low three bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece(u8);

impl Piece {
    pub const WHITE_PAWN: Self = Self::new(Color::White, PieceKind::Pawn);
    pub const WHITE_KNIGHT: Self = Self::new(Color::White, PieceKind::Knight);
    pub const WHITE_BISHOP: Self = Self::new(Color::White, PieceKind::Bishop);
    pub const WHITE_ROOK: Self = Self::new(Color::White, PieceKind::Rook);
    pub const WHITE_QUEEN: Self = Self::new(Color::White, PieceKind::Queen);
    pub const WHITE_KING: Self = Self::new(Color::White, PieceKind::King);

    pub const BLACK_PAWN: Self = Self::new(Color::Black, PieceKind::Pawn);
    pub const BLACK_KNIGHT: Self = Self::new(Color::Black, PieceKind::Knight);
    pub const BLACK_BISHOP: Self = Self::new(Color::Black, PieceKind::Bishop);
    pub const BLACK_ROOK: Self = Self::new(Color::Black, PieceKind::Rook);
    pub const BLACK_QUEEN: Self = Self::new(Color::Black, PieceKind::Queen);
    pub const BLACK_KING: Self = Self::new(Color::Black, PieceKind::King);

    const COLOR_BITS: u8 = 3;
    const KIND_MASK: u8 = 0b0000_0111;

    /// Creates a new [`Piece`] from a [`Color`] and a [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use harmony::{Color, Piece, PieceKind};
    /// let knight = Piece::new(Color::Black, PieceKind::Knight);
    /// assert_eq!(knight, Piece::BLACK_KNIGHT);
    /// assert_eq!(knight.color(), Color::Black);
    /// assert_eq!(knight.kind(), PieceKind::Knight);
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self((color as u8) << Self::COLOR_BITS | kind as u8)
    }

    /// The owner of this [`Piece`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        Color::from_bool(self.0 >> Self::COLOR_BITS != 0)
    }

    /// The kind of this [`Piece`].
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        match self.0 & Self::KIND_MASK {
            0 => PieceKind::Pawn,
            1 => PieceKind::Knight,
            2 => PieceKind::Bishop,
            3 => PieceKind::Rook,
            4 => PieceKind::Queen,
            _ => PieceKind::King,
        }
    }

    /// Returns `true` if this piece belongs to White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        self.color().is_white()
    }

    /// Returns `true` if this piece is of `kind`.
    #[inline(always)]
    pub fn is(&self, kind: PieceKind) -> bool {
        self.kind() == kind
    }

    /// Returns `true` if this piece is a Pawn.
    #[inline(always)]
    pub fn is_pawn(&self) -> bool {
        self.is(PieceKind::Pawn)
    }

    /// Returns `true` if this piece is a King.
    #[inline(always)]
    pub fn is_king(&self) -> bool {
        self.is(PieceKind::King)
    }

    /// Returns `true` if this piece slides along ranks and files (Rook or Queen).
    #[inline(always)]
    pub const fn is_orthogonal_slider(&self) -> bool {
        matches!(self.kind(), PieceKind::Rook | PieceKind::Queen)
    }

    /// Returns `true` if this piece slides along diagonals (Bishop or Queen).
    #[inline(always)]
    pub const fn is_diagonal_slider(&self) -> bool {
        matches!(self.kind(), PieceKind::Bishop | PieceKind::Queen)
    }

    /// Material value of this piece's kind. See [`PieceKind::value`].
    #[inline(always)]
    pub const fn value(&self) -> i32 {
        self.kind().value()
    }

    /// Splits this piece into its owner and kind.
    #[inline(always)]
    pub const fn parts(&self) -> (Color, PieceKind) {
        (self.color(), self.kind())
    }

    /// Creates a [`Piece`] from a FEN character, where uppercase is White.
    ///
    /// # Example
    /// ```
    /// # use harmony::Piece;
    /// assert_eq!(Piece::from_uci('R').unwrap(), Piece::WHITE_ROOK);
    /// assert_eq!(Piece::from_uci('k').unwrap(), Piece::BLACK_KING);
    /// assert!(Piece::from_uci('7').is_err());
    /// ```
    #[inline(always)]
    pub fn from_uci(piece: char) -> Result<Self> {
        let kind = PieceKind::from_uci(piece)?;
        Ok(Self::new(Color::from_case(piece), kind))
    }

    /// FEN character of this piece.
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        let c = self.kind().to_uci();
        if self.is_white() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Alias for [`Piece::to_uci`], as a string slice.
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self.color() {
            Color::White => match self.kind() {
                PieceKind::Pawn => "P",
                PieceKind::Knight => "N",
                PieceKind::Bishop => "B",
                PieceKind::Rook => "R",
                PieceKind::Queen => "Q",
                PieceKind::King => "K",
            },
            Color::Black => self.kind().as_str(),
        }
    }

    /// The same kind of piece, owned by the other side.
    ///
    /// # Example
    /// ```
    /// # use harmony::Piece;
    /// assert_eq!(Piece::WHITE_QUEEN.inverted(), Piece::BLACK_QUEEN);
    /// ```
    #[inline(always)]
    pub const fn inverted(self) -> Self {
        Self::new(self.color().opponent(), self.kind())
    }
}

macro_rules! impl_index_traits {
    ($type:ty) => {
        impl<T> Index<$type> for [T; <$type>::COUNT] {
            type Output = T;
            #[inline(always)]
            fn index(&self, index: $type) -> &Self::Output {
                &self[index.index()]
            }
        }

        impl<T> IndexMut<$type> for [T; <$type>::COUNT] {
            #[inline(always)]
            fn index_mut(&mut self, index: $type) -> &mut Self::Output {
                &mut self[index.index()]
            }
        }
    };
}

macro_rules! impl_display_traits {
    ($type:ty) => {
        impl AsRef<str> for $type {
            #[inline(always)]
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_uci())
            }
        }
    };
}

impl_index_traits!(PieceKind);
impl_index_traits!(Color);

impl_display_traits!(Piece);
impl_display_traits!(PieceKind);
impl_display_traits!(Color);

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{} {}\" ({})", self.color().name(), self.kind().name(), self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_parts_round_trip() {
        for color in Color::all() {
            for kind in PieceKind::all() {
                let piece = Piece::new(color, kind);
                assert_eq!(piece.parts(), (color, kind));
                assert_eq!(Piece::from_uci(piece.to_uci()).unwrap(), piece);
            }
        }
    }

    #[test]
    fn test_piece_debug_names_owner_and_kind() {
        assert_eq!(format!("{:?}", Piece::BLACK_KNIGHT), "\"black knight\" (n)");
        assert_eq!(Piece::WHITE_QUEEN.to_string(), "Q");
    }

    #[test]
    fn test_opponent_is_involution() {
        for color in Color::all() {
            assert_eq!(!!color, color);
            assert_ne!(color.opponent(), color);
        }
    }
}
