/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Sets of squares, stored as 64-bit integers.
mod bitboard;

/// Attack patterns, pseudo-legal destinations, and legality checks.
mod movegen;

/// A single piece moving between two squares.
mod moves;

/// Move-tree node counting, for validating move generation.
mod perft;

/// Colors, piece kinds, and pieces.
mod piece;

/// The placement of every piece on the board.
mod position;

/// The 64 squares of the board.
mod square;

/// Containers with one element per square.
mod table;

pub use bitboard::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
pub use table::*;
