//! hex2tile CLI - Command-line interface
//!
//! Builds an XYZ tile pyramid (`out/{z}/{x}/{y}.png`) from sprites placed on
//! an axial hex grid.

mod commands;
mod error;
mod logging;

use std::process;

use clap::Parser;
use tracing::info;

use commands::build::{self, BuildArgs};
use error::CliError;
use logging::Verbosity;

#[derive(Debug, Parser)]
#[command(name = "hex2tile")]
#[command(version = hex2tile::VERSION)]
#[command(about = "Composite hex-map sprites and cut them into a slippy-map tile pyramid")]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,

    /// Reduce logging to warnings and errors
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug detail (per zoom level)
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.quiet, cli.verbose));

    if let Err(e) = run(cli) {
        e.report();
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.build.min_zoom > cli.build.max_zoom {
        return Err(CliError::Args(format!(
            "--min-zoom ({}) must not exceed --max-zoom ({})",
            cli.build.min_zoom, cli.build.max_zoom
        )));
    }

    let out_dir = cli.build.out_dir.clone();
    let summary = build::run(cli.build, cli.quiet)?;

    info!(
        "Tiles written to: {} ({} tiles, master {}x{})",
        out_dir.display(),
        summary.pyramid.total_tiles(),
        summary.master_width,
        summary.master_height
    );
    Ok(())
}
