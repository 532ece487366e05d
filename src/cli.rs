use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Rainmap precipitation interpolator.
#[derive(Parser)]
#[command(
    name = "rainmap",
    version,
    about = "Inverse-distance-weighted precipitation maps from sparse gauge networks"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Accumulate gauge readings, interpolate over the region, classify and
    /// render the map.
    Interpolate(InterpolateArgs),
}

/// Arguments for the `interpolate` subcommand.
#[derive(clap::Args)]
pub struct InterpolateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "rainmap.toml")]
    pub config: PathBuf,

    /// Override sites CSV path from config.
    #[arg(long)]
    pub sites: Option<PathBuf>,

    /// Override measurements CSV path from config.
    #[arg(long)]
    pub measurements: Option<PathBuf>,

    /// Override output PNG path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override per-point records CSV path from config.
    #[arg(short, long)]
    pub records: Option<PathBuf>,
}
