//! This crate contains the source code for the binary for the game mazebound.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

use clap::Parser;
use color_eyre::{eyre::Result, install};
use mazebound::{App, Difficulty};

/// This structure holds the command-line arguments of the game. It is parsed once at startup and
/// handed over to the application state.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// This field holds the difficulty level the game starts on. It can still be changed from the
    /// in-game level menu.
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    level: Difficulty,
    /// This field holds an optional seed for the random number generator. Passing the same seed
    /// reproduces the same sequence of mazes.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    install()?;

    let args = Args::parse();

    let mut terminal = ratatui::init();
    let result = App::new(args.level, args.seed).run(&mut terminal);
    ratatui::restore();

    result
}
