use std::path::PathBuf;

use clap::Parser;

use crate::theme::ThemeName;

#[derive(Debug, Parser)]
#[command(
    name = "termlink",
    about = "Hack a terminal by guessing its password among the words hidden in memory",
    version
)]
pub struct Cli {
    /// Whitespace-separated word list to draw passwords from
    pub dictionary: PathBuf,

    /// Number of side-by-side memory panels
    #[arg(long)]
    pub panels: Option<usize>,

    /// Rows per panel
    #[arg(long)]
    pub rows: Option<usize>,

    /// Characters per row (also the longest usable word)
    #[arg(long)]
    pub columns: Option<usize>,

    /// Words hidden in the grid
    #[arg(long)]
    pub words: Option<usize>,

    /// Incorrect guesses allowed before lockout
    #[arg(long)]
    pub attempts: Option<usize>,

    /// Seed for a reproducible board
    #[arg(long)]
    pub seed: Option<u64>,

    /// Color theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeName>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log file (defaults to the platform data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Don't record the result in the statistics file
    #[arg(long)]
    pub no_stats: bool,
}
