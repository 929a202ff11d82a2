//! Error taxonomy for the analysis pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can make a file analysis fail. Malformed individual
/// tokens and rows are not represented here: they are filtered during
/// extraction, not raised.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("file is {actual} bytes; the limit is {limit_mb} MB")]
    OversizedInput { actual: u64, limit_mb: u64 },

    #[error("unsupported file format {extension:?}; expected .txt, .csv, .xls or .xlsx")]
    UnsupportedFormat { extension: String },

    #[error("no usable numeric values found in the file")]
    EmptyResult,

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read spreadsheet workbook: {0}")]
    Workbook(#[from] calamine::Error),
}
