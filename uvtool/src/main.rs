//! Color-ID baking from the command line.
//!
//! # Commands
//!
//! - `uvtool bake <SNAPSHOT>` - Bake a JSON mesh snapshot and print its colors
//! - `uvtool bench` - Time the bake on a synthetic quad grid
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=mesh_color_id=debug`).

mod bake;
mod bench;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Color-ID baking for UV-mapped polygon meshes
#[derive(Parser)]
#[command(name = "uvtool")]
#[command(about = "Bake one color per UV island", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML settings file; its `[bake]` table sets the engine parameters
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake a mesh snapshot (JSON flat loop arrays)
    Bake {
        /// Snapshot file
        #[arg(name = "SNAPSHOT")]
        input: PathBuf,

        /// Write the colors here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Emit 8-bit channels instead of floats
        #[arg(long)]
        bytes: bool,

        /// Print the bake report to stderr
        #[arg(long)]
        report: bool,
    },

    /// Time the bake on a synthetic quad grid
    Bench {
        /// Quads along x
        #[arg(long, default_value_t = 1000)]
        nx: u32,

        /// Quads along y
        #[arg(long, default_value_t = 1000)]
        ny: u32,

        /// Cut the grid into one island per row
        #[arg(long)]
        strips: bool,

        /// Number of timed runs
        #[arg(long, default_value_t = 5)]
        iterations: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => mesh_uv_edit::ToolSettings::load(path)?,
        None => mesh_uv_edit::ToolSettings::default(),
    };

    match cli.command {
        Commands::Bake {
            input,
            output,
            bytes,
            report,
        } => bake::run(&input, output.as_deref(), bytes, report, &settings.bake),
        Commands::Bench {
            nx,
            ny,
            strips,
            iterations,
        } => bench::run(nx, ny, strips, iterations, &settings.bake),
    }
}
