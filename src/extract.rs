use std::io::Cursor;
use std::time::Instant;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::error::AnalysisError;

// Maximal runs of digits and decimal separators; everything between runs is
// noise and never reaches the parser.
static NUMBER_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9.]+").expect("numeric run pattern is a valid literal"));

/// How a file's bytes should be interpreted, keyed off its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    DelimitedText,
    Spreadsheet,
}

impl InputFormat {
    /// Map a file extension to an extraction strategy. Unrecognized
    /// extensions get no format, and the caller rejects the file before
    /// reading any content.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" | "csv" => Some(InputFormat::DelimitedText),
            "xls" | "xlsx" => Some(InputFormat::Spreadsheet),
            _ => None,
        }
    }
}

/// Values pulled out of a file, plus how many candidate tokens or cells
/// failed numeric conversion and were skipped. Skips are diagnostics, not
/// errors.
#[derive(Debug, Default, PartialEq)]
pub struct Extraction {
    pub values: Vec<f64>,
    pub skipped_tokens: u32,
}

/// Run the strategy selected by `format` over the raw bytes. Fails with
/// `EmptyResult` when no usable value was found; individual malformed
/// tokens never abort the extraction.
pub fn extract(raw: &[u8], format: InputFormat) -> Result<Extraction, AnalysisError> {
    let start_time = Instant::now();

    let extraction = match format {
        InputFormat::DelimitedText => extract_text(&String::from_utf8_lossy(raw)),
        InputFormat::Spreadsheet => extract_spreadsheet(raw)?,
    };

    if extraction.values.is_empty() {
        return Err(AnalysisError::EmptyResult);
    }

    info!(
        action = "complete",
        component = "extraction",
        value_count = extraction.values.len(),
        skipped_tokens = extraction.skipped_tokens,
        duration_ms = start_time.elapsed().as_millis(),
        "Numeric extraction completed"
    );
    Ok(extraction)
}

fn extract_text(text: &str) -> Extraction {
    let mut extraction = Extraction::default();

    for token in NUMBER_RUNS.find_iter(text) {
        match token.as_str().parse::<f64>() {
            Ok(value) => extraction.values.push(value),
            // Runs like "1.2.3" or a lone "." are dropped, never raised.
            Err(_) => extraction.skipped_tokens += 1,
        }
    }

    extraction
}

fn extract_spreadsheet(raw: &[u8]) -> Result<Extraction, AnalysisError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(raw))?;

    // First sheet only; a workbook with no sheets simply has nothing usable.
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Extraction::default()),
    };

    let mut extraction = Extraction::default();
    for row in range.rows() {
        match row.first() {
            Some(Data::Int(n)) => extraction.values.push(*n as f64),
            Some(Data::Float(n)) => extraction.values.push(*n),
            Some(Data::Empty) | None => {}
            // Headers, labels, dates: the row is skipped, not rejected.
            Some(_) => extraction.skipped_tokens += 1,
        }
    }

    Ok(extraction)
}
