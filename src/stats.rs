use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ingest::Ingested;
use crate::types::TripSummary;

/// Diagnostics for one summary run, appended to the run log as a CSV row.
#[derive(Debug, Default, Serialize)]
pub struct RunStats {
    pub timestamp: DateTime<Utc>,
    pub input: String,

    // rows
    pub complete_records: usize,
    pub incomplete_records: usize,

    // output shape
    pub stations: usize,
    pub aggregated_trips: usize,
    pub ride_types: usize,
    pub member_types: usize,
}

impl RunStats {
    pub fn from_run(input: &str, ingested: &Ingested, summary: &TripSummary) -> Self {
        RunStats {
            timestamp: Utc::now(),
            input: input.to_string(),
            complete_records: ingested.stats.complete,
            incomplete_records: ingested.stats.incomplete,
            stations: summary.stations.len(),
            aggregated_trips: summary.aggregated_trips.len(),
            ride_types: ingested.ride_types.len(),
            member_types: ingested.member_types.len(),
        }
    }

    pub fn total_records(&self) -> usize {
        self.complete_records + self.incomplete_records
    }

    /// Share of rows missing a station id, as a percentage.
    pub fn incomplete_pct(&self) -> f64 {
        let total = self.total_records();
        if total == 0 {
            0.0
        } else {
            (self.incomplete_records as f64 / total as f64) * 100.0
        }
    }
}
