/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::Square;

/// A piece moving from one square to another.
///
/// Moves carry no metadata: there is no notion of castling, en passant, or promotion.
/// Whatever stood on `to` is simply replaced by whatever stood on `from`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new [`Move`] from `from` to `to`.
    ///
    /// # Example
    /// ```
    /// # use harmony::{Move, Square};
    /// let mv = Move::new(Square::E2, Square::E4);
    /// assert_eq!(mv.from(), Square::E2);
    /// assert_eq!(mv.to(), Square::E4);
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// The square this move departs from.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The square this move lands on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Writes this move as two concatenated square names.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for Move {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    /// Displays the move along with the raw square indices.
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({} -> {})", self.from.index(), self.to.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display() {
        let mv = Move::new(Square::E2, Square::E4);
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(mv.to_uci(), "e2e4");
        assert_eq!(format!("{mv:?}"), "e2e4 (52 -> 36)");
    }

    #[test]
    fn test_move_endpoints() {
        let mv = Move::new(Square::B8, Square::C6);
        assert_eq!(mv.from(), Square::B8);
        assert_eq!(mv.to(), Square::C6);
        assert_ne!(mv, Move::new(Square::C6, Square::B8));
    }
}
