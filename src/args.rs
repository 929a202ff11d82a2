use clap::Parser;
use std::path::PathBuf;

use crate::analysis::DEFAULT_MAX_FILE_SIZE_MB;

#[derive(Parser, Debug)]
#[command(
    name = "numtally",
    about = "Analyze a file of numeric values: frequency table, total sum, and a short history",
    version,
    long_about = None
)]
pub struct Args {
    /// File to analyze (.txt, .csv, .xls, .xlsx); omit to only show history
    pub file: Option<PathBuf>,

    /// Show only table rows whose formatted value contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Maximum accepted file size in megabytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE_MB)]
    pub max_size_mb: u64,

    /// Custom path for the history database
    #[arg(long)]
    pub history_path: Option<PathBuf>,

    /// Do not read or write the persisted history
    #[arg(long)]
    pub no_history: bool,

    /// Do not print the distribution chart
    #[arg(long)]
    pub no_chart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
