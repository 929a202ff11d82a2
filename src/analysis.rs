use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use tracing::info;

use crate::args::Args;
use crate::error::AnalysisError;
use crate::extract::{self, InputFormat};
use crate::history::{AnalysisRecord, HistoryRecorder, KvStore};
use crate::stats::{self, FrequencyEntry, ValueStats};
use crate::utils::format_value;

pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 5;

const CHART_WIDTH: usize = 40;

/// Everything one successful run produces: the aggregate view, extraction
/// diagnostics, the record that was appended, and the updated history.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub file_name: String,
    pub stats: ValueStats,
    pub skipped_tokens: u32,
    pub record: AnalysisRecord,
    pub history: Vec<AnalysisRecord>,
}

/// Run one analysis to completion: size ceiling, format detection, read,
/// extract, aggregate, record. The ceiling is checked against file metadata
/// before any content is read, and the extension before the bytes are.
pub fn analyze_file<S: KvStore>(
    path: &Path,
    max_size_mb: u64,
    recorder: &mut HistoryRecorder<S>,
) -> Result<AnalysisOutcome, AnalysisError> {
    let start_time = Instant::now();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    info!(
        action = "start",
        component = "analysis",
        file = %file_name,
        "Starting file analysis"
    );

    let metadata = fs::metadata(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.len() > max_size_mb * 1024 * 1024 {
        return Err(AnalysisError::OversizedInput {
            actual: metadata.len(),
            limit_mb: max_size_mb,
        });
    }

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let format = InputFormat::from_extension(&extension)
        .ok_or(AnalysisError::UnsupportedFormat { extension })?;

    let raw = fs::read(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extraction = extract::extract(&raw, format)?;
    let stats = stats::aggregate(&extraction.values);

    let record = AnalysisRecord {
        file_name: file_name.clone(),
        total_sum: stats.total_sum,
        count: stats.total_count,
        date: Utc::now(),
    };
    let history = recorder.record(record.clone());

    info!(
        action = "complete",
        component = "analysis",
        file = %file_name,
        value_count = stats.total_count,
        distinct_values = stats.entries.len(),
        total_sum = stats.total_sum,
        duration_ms = start_time.elapsed().as_millis(),
        "File analysis completed"
    );

    Ok(AnalysisOutcome {
        file_name,
        stats,
        skipped_tokens: extraction.skipped_tokens,
        record,
        history,
    })
}

pub fn print_analysis_results(outcome: &AnalysisOutcome, args: &Args) {
    println!(
        "Analyzed {} values from {:?}",
        outcome.stats.total_count, outcome.file_name
    );
    println!("\nTotal sum: {}", format_value(outcome.stats.total_sum));
    if outcome.skipped_tokens > 0 {
        println!(
            "Skipped {} malformed token(s) during extraction",
            outcome.skipped_tokens
        );
    }

    let filter = args.filter.as_deref().map(str::to_lowercase);
    let rows: Vec<&FrequencyEntry> = outcome
        .stats
        .entries
        .iter()
        .filter(|entry| match &filter {
            Some(wanted) => format_value(entry.value).to_lowercase().contains(wanted),
            None => true,
        })
        .collect();

    println!("\n{:>12}  {:>7}  {:>14}", "Value", "Count", "Subtotal");
    for entry in &rows {
        println!(
            "{:>12}  {:>7}  {:>14}",
            format_value(entry.value),
            entry.count,
            format_value(entry.subtotal())
        );
    }
    if rows.is_empty() {
        println!("{:>12}", "(no rows)");
    }

    if args.no_chart {
        return;
    }
    if let Some(max_count) = outcome.stats.entries.iter().map(|e| e.count).max() {
        println!("\nValue distribution:");
        for entry in &outcome.stats.entries {
            let bar_len = (entry.count as usize * CHART_WIDTH / max_count as usize).max(1);
            println!(
                "{:>12} | {:<width$} {}",
                format_value(entry.value),
                "#".repeat(bar_len),
                entry.count,
                width = CHART_WIDTH
            );
        }
    }
}

pub fn print_history(history: &[AnalysisRecord]) {
    println!("\nRecent analyses:");
    if history.is_empty() {
        println!("(no history yet)");
        return;
    }

    for record in history {
        println!(
            "- {}: total {} ({} values, {})",
            record.file_name,
            format_value(record.total_sum),
            record.count,
            record.date.format("%B %-d, %Y")
        );
    }
}
