use std::path::PathBuf;

use clap::Parser;

use crate::analysers::dropout::{DEFAULT_THRESHOLD, DEFAULT_WINDOW};

/// Scan a wav file for dropouts.
#[derive(Parser, Debug)]
#[command(name = "dropscan", version, about)]
pub struct Cli {
    /// Input wav file. When omitted, a labelled demo fixture is picked at
    /// random.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Detection threshold in dBFS; windows below it are flagged.
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Analysis window size in samples. Smaller windows localize gaps more
    /// tightly.
    #[arg(short, long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Directory holding the labelled demo fixtures.
    #[arg(long, default_value = "test/audio")]
    pub fixtures: PathBuf,

    /// Where review artifacts (clip + plot) are written.
    #[arg(short, long, default_value = "output")]
    pub out_dir: PathBuf,

    /// Skip rendering artifacts when dropouts are found.
    #[arg(long)]
    pub no_render: bool,

    /// Write a machine-readable report to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Suppress the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Print per-window loudness diagnostics.
    #[arg(short, long)]
    pub debug: bool,
}
