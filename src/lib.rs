pub mod analysis;
pub mod args;
pub mod error;
pub mod extract;
pub mod history;
pub mod sqlite;
pub mod stats;
pub mod utils;

pub use analysis::{analyze_file, AnalysisOutcome};
pub use args::Args;
pub use error::AnalysisError;
pub use extract::{extract, Extraction, InputFormat};
pub use history::{AnalysisRecord, HistoryRecorder, KvStore};
pub use stats::{aggregate, FrequencyEntry, ValueStats};
