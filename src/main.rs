use anyhow::Result;
use clap::Parser;
use std::env;
use std::path::PathBuf;
use tracing::error;

use numtally::analysis;
use numtally::args::Args;
use numtally::history::{HistoryRecorder, KvStore};
use numtally::sqlite::{MemoryStore, SqliteStore};
use numtally::utils;

fn default_history_path() -> PathBuf {
    PathBuf::from(&format!(
        "{}/.numtally_history.db",
        env::var("HOME").unwrap_or_else(|_| env::var("USERPROFILE").unwrap_or_default())
    ))
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    let store: Box<dyn KvStore> = if args.no_history {
        Box::new(MemoryStore::default())
    } else {
        let path = args
            .history_path
            .clone()
            .unwrap_or_else(default_history_path);
        Box::new(SqliteStore::open(&path)?)
    };
    let mut recorder = HistoryRecorder::new(store);

    let file = match args.file.as_deref() {
        Some(file) => file,
        None => {
            analysis::print_history(&recorder.load());
            return Ok(());
        }
    };

    match analysis::analyze_file(file, args.max_size_mb, &mut recorder) {
        Ok(outcome) => {
            analysis::print_analysis_results(&outcome, &args);
            analysis::print_history(&outcome.history);
            Ok(())
        }
        Err(e) => {
            error!(action = "fail", component = "analysis", error = %e, "File analysis failed");
            std::process::exit(1);
        }
    }
}
