//! Report writers for benchmark results.

use crate::bench::{BenchError, SizeSummary, TrialRecord};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name of the per-trial CSV report.
pub const CSV_FILE_NAME: &str = "boyer_moore.csv";
/// File name of the per-size JSON summary.
pub const SUMMARY_FILE_NAME: &str = "summary.json";
/// Header row of the per-trial CSV report.
pub const CSV_HEADER: &str = "n,trial,time_ns,reads,comparisons,memory_bytes,found";

/// Formats one trial as a CSV row matching [`CSV_HEADER`].
pub fn csv_row(record: &TrialRecord) -> String {
    format!(
        "{},{},{},{},{},{},{}",
        record.n,
        record.trial,
        record.time_ns,
        record.reads,
        record.comparisons,
        record.memory_bytes,
        record.found
    )
}

/// Writes `base_dir/boyer_moore.csv` and returns its path.
pub fn write_csv(
    base_dir: impl AsRef<Path>,
    records: &[TrialRecord],
) -> Result<PathBuf, BenchError> {
    let dir = base_dir.as_ref();
    create_dir_all(dir)?;
    let path = dir.join(CSV_FILE_NAME);
    let mut writer = BufWriter::new(File::create(&path)?);
    writeln!(writer, "{CSV_HEADER}")?;
    for record in records {
        writeln!(writer, "{}", csv_row(record))?;
    }
    writer.flush()?;
    Ok(path)
}

/// Writes `base_dir/summary.json` and returns its path.
pub fn write_summary_json(
    base_dir: impl AsRef<Path>,
    summaries: &[SizeSummary],
) -> Result<PathBuf, BenchError> {
    let dir = base_dir.as_ref();
    create_dir_all(dir)?;
    let path = dir.join(SUMMARY_FILE_NAME);
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, summaries)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(path)
}

/// Renders the per-size averages as a fixed-width table.
pub fn render_table(summaries: &[SizeSummary]) -> Vec<String> {
    let mut lines = Vec::with_capacity(summaries.len() + 2);
    lines.push(format!(
        "{:>8} | {:>6} | {:>14} | {:>12} | {:>12} | {:>12} | {:>5}",
        "n", "trials", "avg_time(ns)", "avg_reads", "avg_cmp", "avg_bytes", "found"
    ));
    lines.push("-".repeat(90));
    for s in summaries {
        lines.push(format!(
            "{:>8} | {:>6} | {:>14.1} | {:>12.1} | {:>12.1} | {:>12.1} | {:>5}",
            s.n,
            s.trials,
            s.avg_time_ns,
            s.avg_reads,
            s.avg_comparisons,
            s.avg_memory_bytes,
            s.found
        ));
    }
    lines
}
