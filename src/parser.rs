//! CSV reader for bike-share trip history files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{PrepError, Result};
use crate::types::TripRecord;

/// Reads every row of the CSV at `path` into memory.
///
/// # Errors
///
/// [`PrepError::InputNotFound`] if the file does not exist,
/// [`PrepError::InputUnreadable`] if it cannot be opened or any row fails to decode.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_trip_records(path: &Path) -> Result<Vec<TripRecord>> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(PrepError::InputNotFound { path: display });
    }

    let file = File::open(path).map_err(|e| PrepError::InputUnreadable {
        path: display.clone(),
        source: e.into(),
    })?;

    let records = parse_trip_records(file).map_err(|source| PrepError::InputUnreadable {
        path: display,
        source,
    })?;

    debug!(rows = records.len(), "Trip records read");
    Ok(records)
}

/// Decodes trip records from any CSV source with a header row.
pub fn parse_trip_records<R: Read>(reader: R) -> std::result::Result<Vec<TripRecord>, csv::Error> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let record: TripRecord = result?;
        rows.push(record);
    }

    Ok(rows)
}
