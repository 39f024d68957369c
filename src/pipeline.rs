//! End-to-end summary run: read, ingest, aggregate, write.

use std::path::Path;

use tracing::info;

use crate::aggregate::aggregate;
use crate::error::Result;
use crate::ingest::ingest;
use crate::output::write_summary;
use crate::parser::read_trip_records;
use crate::stats::RunStats;
use crate::types::TripSummary;

/// Result of a completed run.
#[derive(Debug)]
pub struct Prepared {
    pub summary: TripSummary,
    pub stats: RunStats,
}

/// Summarizes the trip CSV at `input` and writes the document to `output`.
///
/// Nothing is written if the input cannot be read.
#[tracing::instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn prepare(input: &Path, output: &Path) -> Result<Prepared> {
    let records = read_trip_records(input)?;
    let ingested = ingest(&records);
    let summary = aggregate(&ingested);

    write_summary(output, &summary)?;

    let stats = RunStats::from_run(&input.display().to_string(), &ingested, &summary);
    info!(
        complete = stats.complete_records,
        incomplete = stats.incomplete_records,
        incomplete_pct = stats.incomplete_pct(),
        "Run complete"
    );

    Ok(Prepared { summary, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;
    use std::fs;

    #[test]
    fn test_prepare_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");

        let err = prepare(&dir.path().join("missing.csv"), &output).unwrap_err();

        assert!(matches!(err, PrepError::InputNotFound { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_prepare_small_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trips.csv");
        let output = dir.path().join("trips.json");
        fs::write(
            &input,
            "rideable_type,start_station_name,start_station_id,end_station_name,end_station_id,start_lat,start_lng,end_lat,end_lng,member_casual\n\
             classic_bike,Alpha,A,Beta,B,1,2,3,4,member\n\
             classic_bike,Alpha,A,,,1,2,,,member\n",
        )
        .unwrap();

        let prepared = prepare(&input, &output).unwrap();

        assert_eq!(prepared.stats.complete_records, 1);
        assert_eq!(prepared.stats.incomplete_records, 1);
        assert_eq!(prepared.summary.stations.len(), 2);
        assert!(output.exists());
    }
}
