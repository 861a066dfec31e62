//! ScratchForge command-line player
//!
//! Usage:
//!   scratchforge --config config/config.json --betting-amount 100
//!   scratchforge --seed 42 --show-matrix        - Reproducible round with grid on stderr
//!   scratchforge --cell-lookup product --compact
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`. Stdout carries
//! only the JSON result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use sf_engine::{CellLookup, ConfigParser, ScratchGame};

#[derive(Parser)]
#[command(name = "scratchforge", version, about = "Play one scratch-card round")]
struct Cli {
    /// Game configuration file
    #[arg(long, default_value = "config/config.json")]
    config: PathBuf,

    /// Bet for the round
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    betting_amount: u64,

    /// Seed for a reproducible round
    #[arg(long)]
    seed: Option<u64>,

    /// How grid cells find their probability table
    #[arg(long, value_enum, default_value_t = Lookup::Coordinates)]
    cell_lookup: Lookup,

    /// Also print the grid as aligned text on stderr
    #[arg(long)]
    show_matrix: bool,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Lookup {
    /// Match the cell's row and column fields
    Coordinates,
    /// Index `row * columns + column`
    RowMajor,
    /// Index `row * column`
    Product,
}

impl From<Lookup> for CellLookup {
    fn from(lookup: Lookup) -> Self {
        match lookup {
            Lookup::Coordinates => CellLookup::Coordinates,
            Lookup::RowMajor => CellLookup::RowMajor,
            Lookup::Product => CellLookup::Product,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = ConfigParser::new()
        .load(&cli.config)
        .with_context(|| format!("Failed to load game config {}", cli.config.display()))?;

    let game = match cli.seed {
        Some(seed) => ScratchGame::with_seed(config, seed),
        None => ScratchGame::new(config),
    };
    let mut game = game.with_lookup(cli.cell_lookup.into());
    log::debug!("Cell lookup: {}", CellLookup::from(cli.cell_lookup).name());

    let result = game
        .play(cli.betting_amount)
        .context("Failed to play round")?;

    if cli.show_matrix {
        eprintln!("{}", result.matrix.render());
    }

    let json = if cli.compact {
        result.to_json()
    } else {
        result.to_json_pretty()
    }
    .context("Failed to serialize result")?;
    println!("{json}");

    Ok(())
}
