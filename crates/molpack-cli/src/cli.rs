use clap::{Args, Parser, Subcommand};
use molpack::engine::config::FileType;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "molpack - build Packmol input decks and run Packmol to assemble molecular systems.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the Packmol input file and run Packmol on it.
    Pack(PackArgs),
    /// Write the Packmol input file only, without running Packmol.
    Input(PackArgs),
}

/// Arguments shared by the `pack` and `input` subcommands.
#[derive(Args, Debug, Clone)]
pub struct PackArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory that receives the input deck, Packmol output and log.
    #[arg(short, long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    // --- Molecular Inputs ---
    /// Add a structure as NAME=FILE. Can be used multiple times; order is preserved.
    #[arg(long = "structure", value_name = "NAME=FILE")]
    pub structures: Vec<String>,

    /// Set the number of copies for a structure as NAME=COUNT. Can be used multiple times.
    #[arg(long = "count", value_name = "NAME=COUNT")]
    pub counts: Vec<String>,

    /// Packing region as six comma-separated bounds: XMIN,YMIN,ZMIN,XMAX,YMAX,ZMAX.
    #[arg(
        long = "box",
        value_name = "BOUNDS",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub packing_box: Option<Vec<f64>>,

    // --- Packmol Parameters ---
    /// Override the minimum distance between packed structures (Angstroms).
    #[arg(short, long, value_name = "FLOAT")]
    pub tolerance: Option<f64>,

    /// Override the random seed passed to Packmol.
    #[arg(long, value_name = "INT", allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Override the coordinate file type (xyz, pdb, tinker, moldy).
    #[arg(long, value_name = "TYPE")]
    pub filetype: Option<FileType>,

    /// Path to the Packmol executable. Defaults to `packmol` on the search path.
    #[arg(long, value_name = "PATH")]
    pub packmol: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S packing.seed=42
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
