use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use mineclear_core::{CellCount, Coord, GameConfig, RandomBoardGenerator, RoundController};

use crate::cue::LogCueSink;
use crate::game_loop::{GameLoop, stdin_lines};

mod cue;
mod game_loop;
mod input;
mod layout;
mod render;

/// Mine Clearance: reveal every safe cell and mark every mine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Number of cells along each side of the board
    #[arg(short, long, default_value_t = 9)]
    size: Coord,

    /// Number of mines on the board
    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per frame of the game loop
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed: {seed}");

    let config = GameConfig::new(args.size, args.mines).context("invalid board configuration")?;
    let round = RoundController::new(config, RandomBoardGenerator::new(seed))
        .context("could not start the first round")?;

    let mut game = GameLoop::new(
        round,
        io::stdout(),
        LogCueSink,
        Duration::from_millis(args.tick_ms),
    );
    game.run(stdin_lines())?;
    log::debug!("Exiting in phase {:?}", game.round().phase());
    Ok(())
}
