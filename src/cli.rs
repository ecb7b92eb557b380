/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::path::PathBuf;

use clap::{builder::PossibleValue, ArgAction, Parser, ValueEnum};
use log::LevelFilter;

use crate::{Color, FEN_STARTPOS};

/// Evaluate a single chess position across twelve positional factors.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// The position to evaluate, in FEN. Only the piece placement field is read.
    ///
    /// Defaults to the standard starting position.
    #[arg(value_name = "FEN", num_args = 1..)]
    pub fen: Vec<String>,

    /// The side whose point of view the factors are reported from.
    #[arg(short, long, default_value = "white")]
    pub perspective: Color,

    /// If set, the board will be printed before the evaluation.
    #[arg(short, long, default_value = "false")]
    pub board: bool,

    /// If set, the legal moves of both sides will be printed before the evaluation.
    #[arg(short, long, default_value = "false")]
    pub moves: bool,

    /// Increase logging verbosity. May be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of the terminal.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Performs a split perft to the supplied depth, with the perspective side moving first.
    #[arg(long, value_name = "DEPTH")]
    pub perft: Option<usize>,
}

impl Cli {
    /// The FEN supplied on the command line, or the starting position if none was.
    pub fn fen(&self) -> String {
        if self.fen.is_empty() {
            FEN_STARTPOS.to_string()
        } else {
            self.fen.join(" ")
        }
    }

    /// The log level selected by the number of `-v` flags.
    pub fn level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

impl ValueEnum for Color {
    fn value_variants<'a>() -> &'a [Self] {
        &[Color::White, Color::Black]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        // Accept the full name as well as the FEN character
        Some(PossibleValue::new(self.name()).alias(self.as_str()))
    }
}
