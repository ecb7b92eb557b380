/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::{Bitboard, Color, Move, Piece, PieceKind, Square};

/// Piece layout of either back rank in the standard starting position, from file `a` to file `h`.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The placement of every piece on a chess board, and nothing else.
///
/// There is no side to move, no castling rights, no en passant square, and no move counters.
/// A [`Position`] is evaluated exactly as it stands.
///
/// Internally this is a mailbox of 64 squares, backed by redundant [`Bitboard`]s of each color and each piece kind
/// so that set queries (occupancy, "all of White's pawns", ...) are cheap.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// All squares occupied by a specific color.
    colors: [Bitboard; Color::COUNT],

    /// All squares occupied by a specific piece kind.
    kinds: [Bitboard; PieceKind::COUNT],

    /// What stands on each square, if anything.
    mailbox: [Option<Piece>; Square::COUNT],
}

impl Position {
    /// Creates a new, empty [`Position`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use harmony::Position;
    /// let position = Position::new();
    /// assert_eq!(position.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            colors: [Bitboard::EMPTY_BOARD; Color::COUNT],
            kinds: [Bitboard::EMPTY_BOARD; PieceKind::COUNT],
            mailbox: [None; Square::COUNT],
        }
    }

    /// Decodes the piece placement field of a [FEN](https://www.chessprogramming.org/Forsyth-Edwards_Notation) string.
    ///
    /// Only the first whitespace-separated field is read; side to move, castling rights, and the like are ignored.
    /// The field must contain exactly 8 `/`-separated rank descriptors, read from row `0` (rank 8) to row `7` (rank 1).
    /// Within a descriptor, a digit in `1..=8` skips that many empty squares and a letter from `PNBRQKpnbrqk` places a piece,
    /// uppercase for White. Every descriptor must cover exactly 8 files.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Piece, Position, Square};
    /// let position = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
    /// assert_eq!(position.piece_at(Square::E4), Some(Piece::WHITE_PAWN));
    /// assert_eq!(position.piece_at(Square::E8), Some(Piece::BLACK_KING));
    ///
    /// assert!(Position::from_fen("8/8/8").is_err());
    /// assert!(Position::from_fen("9/8/8/8/8/8/8/8").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut position = Self::new();

        let placements = fen.split_whitespace().next().unwrap_or_default();
        let descriptors = placements.split('/').collect::<Vec<_>>();

        if descriptors.len() != 8 {
            bail!(
                "FEN must have piece placements for all 8 ranks. Got {} in {placements:?}",
                descriptors.len()
            );
        }

        for (row, descriptor) in descriptors.into_iter().enumerate() {
            let mut col = 0u8;

            for c in descriptor.chars() {
                if col >= 8 {
                    bail!("FEN rank descriptor {descriptor:?} covers more than 8 files");
                }

                if let Some(empty) = c.to_digit(10) {
                    if !(1..=8).contains(&empty) {
                        bail!("FEN empty-square counts must be between [1, 8]. Got {c:?} in {descriptor:?}");
                    }

                    col += empty as u8;
                    if col > 8 {
                        bail!("FEN rank descriptor {descriptor:?} covers more than 8 files");
                    }
                } else {
                    let Ok(piece) = Piece::from_uci(c) else {
                        bail!("FEN placements must contain piece chars or digits. Got {c:?} in {descriptor:?}");
                    };

                    position.place(piece, Square::new(row as u8, col));
                    col += 1;
                }
            }

            if col != 8 {
                bail!("FEN rank descriptor {descriptor:?} covers {col} files instead of 8");
            }
        }

        Ok(position)
    }

    /// Encodes the piece placement of this [`Position`] as a FEN field.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Position, FEN_STARTPOS};
    /// let position = Position::default();
    /// assert_eq!(position.to_fen(), FEN_STARTPOS);
    /// ```
    pub fn to_fen(&self) -> String {
        let mut descriptors = Vec::with_capacity(8);

        for row in 0..8 {
            let mut descriptor = String::with_capacity(8);
            let mut empty_spaces = 0;

            for col in 0..8 {
                if let Some(piece) = self.piece_at(Square::new(row, col)) {
                    if empty_spaces != 0 {
                        descriptor += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    descriptor += piece.as_ref();
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                descriptor += &empty_spaces.to_string();
            }

            descriptors.push(descriptor);
        }

        descriptors.join("/")
    }

    /// Places `piece` on `square`, replacing anything already there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.take(square);

        let (color, kind) = piece.parts();
        self.colors[color].set(square);
        self.kinds[kind].set(square);
        self.mailbox[square] = Some(piece);
    }

    /// Removes and returns whatever stands on `square`.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.mailbox[square].take()?;

        let (color, kind) = piece.parts();
        self.colors[color].clear(square);
        self.kinds[kind].clear(square);

        Some(piece)
    }

    /// Fetches the [`Piece`] on `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Fetches the [`Color`] of the piece on `square`.
    ///
    /// Empty squares have no color, so this returns `None` for them.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Color, Position, Square};
    /// let position = Position::default();
    /// assert_eq!(position.color_at(Square::E2), Some(Color::White));
    /// assert_eq!(position.color_at(Square::E4), None);
    /// ```
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color())
    }

    /// Fetches the [`PieceKind`] of the piece on `square`.
    #[inline(always)]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.piece_at(square).map(|piece| piece.kind())
    }

    /// Returns `true` if a piece stands on `square`.
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Every occupied square.
    #[inline(always)]
    pub const fn occupied(&self) -> Bitboard {
        self.colors[0].or(self.colors[1])
    }

    /// Every square occupied by `color`.
    #[inline(always)]
    pub const fn color_mask(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// Every square occupied by a piece of `kind`, of either color.
    #[inline(always)]
    pub const fn kind_mask(&self, kind: PieceKind) -> Bitboard {
        self.kinds[kind.index()]
    }

    /// Every square occupied by a `color` piece of `kind`.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Color, PieceKind, Position, Square};
    /// let position = Position::default();
    /// let knights = position.piece_parts(Color::Black, PieceKind::Knight);
    /// assert_eq!(knights.iter().collect::<Vec<_>>(), vec![Square::B8, Square::G8]);
    /// ```
    #[inline(always)]
    pub fn piece_parts(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.color_mask(color) & self.kind_mask(kind)
    }

    /// Every square occupied by a `color` Pawn.
    #[inline(always)]
    pub fn pawns(&self, color: Color) -> Bitboard {
        self.piece_parts(color, PieceKind::Pawn)
    }

    /// Number of `color` pieces of `kind` on the board.
    #[inline(always)]
    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.piece_parts(color, kind).len()
    }

    /// Number of `color` pieces on the board, of any kind.
    #[inline(always)]
    pub fn piece_count(&self, color: Color) -> usize {
        self.color_mask(color).len()
    }

    /// Locates `color`'s King.
    ///
    /// Returns `None` if `color` has no King, which callers must handle.
    /// If a side somehow has several Kings, the lowest-indexed one is returned.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Color, Position, Square};
    /// let position = Position::default();
    /// assert_eq!(position.king_square(Color::White), Some(Square::E1));
    ///
    /// let kingless = Position::from_fen("8/8/8/8/8/8/8/4K3").unwrap();
    /// assert_eq!(kingless.king_square(Color::Black), None);
    /// ```
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.piece_parts(color, PieceKind::King).lsb()
    }

    /// An iterator over every occupied square and its piece, in ascending square order.
    #[inline(always)]
    pub const fn pieces(&self) -> PositionIter<'_> {
        self.iter_for(self.occupied())
    }

    /// An iterator over every square occupied by `color` and its piece, in ascending square order.
    #[inline(always)]
    pub const fn pieces_of(&self, color: Color) -> PositionIter<'_> {
        self.iter_for(self.color_mask(color))
    }

    /// An iterator over every occupied square in `mask` and its piece.
    #[inline(always)]
    pub const fn iter_for(&self, mask: Bitboard) -> PositionIter<'_> {
        PositionIter {
            position: self,
            occupancy: Bitboard::new(mask.inner() & self.occupied().inner()),
        }
    }

    /// Returns a copy of this position where the piece on `from` has moved to `to`.
    ///
    /// Whatever stood on `to` is overwritten and `from` is left empty.
    /// If `from` was already empty, `to` ends up empty as well.
    /// `self` is never modified.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Piece, Position, Square};
    /// let position = Position::default();
    /// let after = position.simulate(Square::E2, Square::E4);
    /// assert_eq!(after.piece_at(Square::E4), Some(Piece::WHITE_PAWN));
    /// assert_eq!(after.piece_at(Square::E2), None);
    /// assert_eq!(position.piece_at(Square::E2), Some(Piece::WHITE_PAWN));
    /// ```
    pub fn simulate(&self, from: Square, to: Square) -> Self {
        let mut copy = *self;
        let piece = copy.take(from);
        copy.take(to);

        if let Some(piece) = piece {
            copy.place(piece, to);
        }

        copy
    }

    /// Alias for [`Position::simulate`] that takes a [`Move`].
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Self {
        self.simulate(mv.from(), mv.to())
    }

    /// Reflects the board across its horizontal midline and swaps the color of every piece.
    ///
    /// The result is the same position seen from the other side of the board.
    /// Mirroring twice yields the original position.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Piece, Position, Square};
    /// let position = Position::from_fen("4k3/8/8/8/8/8/1P6/4K3").unwrap();
    /// let mirrored = position.mirror();
    /// assert_eq!(mirrored.piece_at(Square::B7), Some(Piece::BLACK_PAWN));
    /// assert_eq!(mirrored.mirror(), position);
    /// ```
    pub fn mirror(&self) -> Self {
        let mut mirrored = Self::new();

        for (square, piece) in self.pieces() {
            mirrored.place(piece.inverted(), square.flipped_rank());
        }

        mirrored
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    /// Wrapper for [`Position::from_fen`].
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Default for Position {
    /// The standard starting position.
    fn default() -> Self {
        let mut position = Self::new();

        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            let col = col as u8;
            position.place(Piece::new(Color::Black, kind), Square::new(0, col));
            position.place(Piece::BLACK_PAWN, Square::new(1, col));
            position.place(Piece::WHITE_PAWN, Square::new(6, col));
            position.place(Piece::new(Color::White, kind), Square::new(7, col));
        }

        position
    }
}

impl fmt::Display for Position {
    /// Prints the board as an 8x8 grid, rank 8 at the top, with rank and file labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for row in 0..8 {
            board += &format!("{}| ", 8 - row);

            for col in 0..8 {
                let occupant = self
                    .piece_at(Square::new(row, col))
                    .map(|piece| piece.to_uci())
                    .unwrap_or('.');

                board += &format!("{occupant} ");
            }

            board += "\n";
        }
        board += " +----------------\n   a b c d e f g h";

        write!(f, "{board}")
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nFEN: {}", self, self.to_fen())
    }
}

/// An iterator over a set of squares on a [`Position`].
///
/// Calls to [`Iterator::next`] will yield a tuple of a [`Square`] and a [`Piece`].
pub struct PositionIter<'a> {
    /// The position to retrieve pieces from.
    position: &'a Position,

    /// The occupied squares left to visit.
    occupancy: Bitboard,
}

impl Iterator for PositionIter<'_> {
    type Item = (Square, Piece);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(square) = self.occupancy.pop_lsb() {
            if let Some(piece) = self.position.piece_at(square) {
                return Some((square, piece));
            }
        }

        None
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.occupancy.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FEN_STARTPOS;

    #[test]
    fn test_default_matches_startpos_fen() {
        assert_eq!(Position::default(), Position::from_fen(FEN_STARTPOS).unwrap());
        assert_eq!(Position::default().piece_count(Color::White), 16);
        assert_eq!(Position::default().piece_count(Color::Black), 16);
    }

    #[test]
    fn test_start_position_orientation() {
        let position = Position::default();

        // Lowercase pieces on rows 0-1, uppercase on rows 6-7
        for square in Square::iter() {
            match square.row() {
                0 | 1 => assert_eq!(position.color_at(square), Some(Color::Black)),
                6 | 7 => assert_eq!(position.color_at(square), Some(Color::White)),
                _ => assert_eq!(position.piece_at(square), None),
            }
        }

        assert_eq!(position.piece_at(Square::new(0, 0)), Some(Piece::BLACK_ROOK));
        assert_eq!(position.piece_at(Square::new(7, 4)), Some(Piece::WHITE_KING));
    }

    #[test]
    fn test_fen_errors() {
        // Wrong number of descriptors
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8/8").is_err());

        // Descriptors that do not cover exactly 8 files
        assert!(Position::from_fen("7/8/8/8/8/8/8/8").is_err());
        assert!(Position::from_fen("pppppppp1/8/8/8/8/8/8/8").is_err());
        assert!(Position::from_fen("44p/8/8/8/8/8/8/8").is_err());

        // Bad characters
        assert!(Position::from_fen("0008/8/8/8/8/8/8/8").is_err());
        assert!(Position::from_fen("9/8/8/8/8/8/8/8").is_err());
        assert!(Position::from_fen("rnbqkbnx/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            FEN_STARTPOS,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
            "8/8/8/8/8/8/8/8",
        ];

        for fen in fens {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }

        // Trailing fields are ignored
        let with_fields = Position::from_fen(&format!("{FEN_STARTPOS} w KQkq - 0 1")).unwrap();
        assert_eq!(with_fields, Position::default());
    }

    #[test]
    fn test_place_and_take_keep_masks_in_sync() {
        let mut position = Position::new();
        position.place(Piece::WHITE_ROOK, Square::D4);
        position.place(Piece::BLACK_QUEEN, Square::D4);

        assert_eq!(position.piece_at(Square::D4), Some(Piece::BLACK_QUEEN));
        assert!(position.color_mask(Color::White).is_empty());
        assert!(position.kind_mask(PieceKind::Rook).is_empty());
        assert_eq!(position.count(Color::Black, PieceKind::Queen), 1);

        assert_eq!(position.take(Square::D4), Some(Piece::BLACK_QUEEN));
        assert!(position.occupied().is_empty());
        assert_eq!(position.take(Square::D4), None);
    }

    #[test]
    fn test_simulate_from_empty_square_clears_target() {
        let position = Position::default();
        let after = position.simulate(Square::E4, Square::E2);
        assert_eq!(after.piece_at(Square::E2), None);
        assert_eq!(after.piece_count(Color::White), 15);
    }

    #[test]
    fn test_mirror_swaps_sides() {
        let position = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R").unwrap();
        let mirrored = position.mirror();

        for square in Square::iter() {
            let original = position.piece_at(square);
            let reflected = mirrored.piece_at(square.flipped_rank());
            assert_eq!(original.map(|p| p.inverted()), reflected);
        }

        assert_eq!(mirrored.mirror(), position);
        assert_eq!(Position::default().mirror(), Position::default());
    }

    #[test]
    fn test_pieces_iterates_in_square_order() {
        let position = Position::default();
        let squares = position.pieces().map(|(sq, _)| sq.index()).collect::<Vec<_>>();
        let expected = (0..16).chain(48..64).collect::<Vec<_>>();
        assert_eq!(squares, expected);
        assert_eq!(position.pieces_of(Color::White).count(), 16);
    }
}
