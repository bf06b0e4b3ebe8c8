use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ior_convert::convert;

/// Convert tabulated refractive-index data into the renderer's
/// sampled-spectrum JSON representation.
#[derive(Parser)]
#[command(name = "ior-convert", version, about)]
struct Cli {
    /// Directory the per-material JSON files are written into. Must exist.
    #[arg(long, default_value = "ior")]
    output: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert refractiveindex.info CSV exports found under a directory
    Csv {
        /// Root directory scanned recursively for `.csv` files
        root: PathBuf,
    },
    /// Convert the ior tables of a Mitsuba2 source checkout
    Mitsuba {
        /// Root of the Mitsuba2 source tree (contains `resources/data/ior`)
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Csv { root } => convert::convert_csv_tree(&root, &cli.output),
        Commands::Mitsuba { root } => convert::convert_mitsuba_tree(&root, &cli.output),
    }
}
