/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation: squares, pieces, positions, and move generation.
mod board;

/// Command-line argument parsing for the `harmony` binary.
mod cli;

/// Evaluation of chess positions.
mod eval;

/// Misc utility constants.
mod utils;

pub use board::*;
pub use cli::*;
pub use eval::*;
pub use utils::*;
