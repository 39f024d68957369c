//! Persistence for the summary document and run diagnostics.
//!
//! The summary is written as two-space indented JSON; run stats are appended
//! to a CSV log.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use tracing::{debug, info};

use crate::error::{PrepError, Result};
use crate::stats::RunStats;
use crate::types::TripSummary;

/// Writes `summary` to `path` as pretty-printed JSON, replacing any existing file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_summary(path: &Path, summary: &TripSummary) -> Result<()> {
    let to_err = |source: std::io::Error| PrepError::OutputWriteFailure {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(to_err)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, summary).map_err(|e| to_err(e.into()))?;
    writer.write_all(b"\n").map_err(to_err)?;
    writer.flush().map_err(to_err)?;

    info!(
        stations = summary.stations.len(),
        aggregated_trips = summary.aggregated_trips.len(),
        "Summary written"
    );
    Ok(())
}

/// Loads a summary document previously produced by [`write_summary`].
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_summary(path: &Path) -> Result<TripSummary> {
    let to_err = |source: std::io::Error| PrepError::SummaryUnreadable {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(to_err)?;
    let summary: TripSummary =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| to_err(e.into()))?;

    debug!(
        stations = summary.stations.len(),
        aggregated_trips = summary.aggregated_trips.len(),
        "Summary loaded"
    );
    Ok(summary)
}

/// Appends a [`RunStats`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_run_stats(path: &Path, stats: &RunStats) -> Result<()> {
    let to_err = |source: csv::Error| PrepError::StatsWriteFailure {
        path: path.display().to_string(),
        source,
    };

    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending run stats");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| to_err(e.into()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(stats).map_err(to_err)?;
    writer.flush().map_err(|e| to_err(e.into()))?;

    Ok(())
}
