/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fs::File, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use harmony::{analyze, splitperft, Cli, Color, Position};
use log::info;
use simplelog::{Config, SimpleLogger, WriteLogger};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    init_logging(cli)?;

    let position = Position::from_fen(&cli.fen())?;
    info!("Evaluating {} for {}", position.to_fen(), cli.perspective.name());

    if cli.board {
        println!("{position}\n");
    }

    if cli.moves {
        for color in Color::all() {
            let moves = position.legal_moves(color);
            let list = moves.iter().map(|mv| mv.to_uci()).collect::<Vec<_>>().join(" ");
            println!("{} ({}): {list}", color.title(), moves.len());
        }
        println!();
    }

    if let Some(depth) = cli.perft {
        let split = splitperft(&position, cli.perspective, depth);
        let nodes: u64 = split.iter().map(|(_, n)| n).sum();

        for (mv, n) in &split {
            println!("{mv}\t{n}");
        }
        println!("\n{nodes}\n");
    }

    println!("{}", analyze(&position, cli.perspective));

    Ok(())
}

/// Installs a logger on the terminal, or on `--log-file` if one was given.
fn init_logging(cli: &Cli) -> Result<()> {
    let level = cli.level_filter();

    if let Some(path) = &cli.log_file {
        let file = File::create(path).with_context(|| format!("Failed to create log file {path:?}"))?;
        WriteLogger::init(level, Config::default(), file)?;
    } else {
        SimpleLogger::init(level, Config::default())?;
    }

    Ok(())
}
