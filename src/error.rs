//! Fatal errors for a summary run.
//!
//! Rows missing a station id are not errors; they are counted in
//! [`IngestStats`](crate::ingest::IngestStats) and skipped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepError {
    /// The input CSV does not exist.
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// The input exists but could not be opened or decoded as CSV.
    #[error("Failed to read trip data from '{path}': {source}")]
    InputUnreadable {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// The summary document could not be written.
    #[error("Failed to write summary to '{path}': {source}")]
    OutputWriteFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A previously written summary could not be loaded.
    #[error("Failed to load summary from '{path}': {source}")]
    SummaryUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The run diagnostics log could not be appended to.
    #[error("Failed to append run stats to '{path}': {source}")]
    StatsWriteFailure {
        path: String,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, PrepError>;
