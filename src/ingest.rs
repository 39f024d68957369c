//! Record ingestion: station registry and categorized trip counts.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::types::{Station, TripKey, TripRecord};

/// Row counters for one ingest pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub complete: usize,
    pub incomplete: usize,
}

/// Everything extracted from the raw rows.
#[derive(Debug, Default)]
pub struct Ingested {
    /// Stations keyed by id, with attributes from their first sighting.
    pub stations: BTreeMap<String, Station>,
    /// Occurrences of each (start, end, ride type, member type) combination.
    pub trip_counts: BTreeMap<TripKey, u64>,
    pub ride_types: BTreeSet<String>,
    pub member_types: BTreeSet<String>,
    pub stats: IngestStats,
}

impl Ingested {
    /// Folds one row into the registry and counters.
    ///
    /// Rows missing either station id only bump `stats.incomplete`.
    pub fn add_record(&mut self, record: &TripRecord) {
        if !record.is_complete() {
            self.stats.incomplete += 1;
            debug!(
                ride_id = %record.ride_id,
                start_station_id = %record.start_station_id,
                end_station_id = %record.end_station_id,
                "Skipping incomplete record"
            );
            return;
        }

        self.stats.complete += 1;

        self.stations
            .entry(record.start_station_id.clone())
            .or_insert_with(|| record.start_station());
        self.stations
            .entry(record.end_station_id.clone())
            .or_insert_with(|| record.end_station());

        self.ride_types.insert(record.rideable_type.clone());
        self.member_types.insert(record.member_casual.clone());

        let key = TripKey {
            start_station_id: record.start_station_id.clone(),
            end_station_id: record.end_station_id.clone(),
            ride_type: record.rideable_type.clone(),
            member_type: record.member_casual.clone(),
        };
        *self.trip_counts.entry(key).or_default() += 1;
    }
}

/// Runs every record through [`Ingested::add_record`].
pub fn ingest<'a, I>(records: I) -> Ingested
where
    I: IntoIterator<Item = &'a TripRecord>,
{
    let mut ingested = Ingested::default();

    for record in records {
        ingested.add_record(record);
    }

    let IngestStats {
        complete,
        incomplete,
    } = ingested.stats;

    if complete == 0 && incomplete > 0 {
        warn!(incomplete, "Every record is missing a station id");
    }

    info!(
        complete,
        incomplete,
        stations = ingested.stations.len(),
        ride_types = ingested.ride_types.len(),
        member_types = ingested.member_types.len(),
        "Records ingested"
    );

    ingested
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(start: &str, end: &str, ride: &str, member: &str) -> TripRecord {
        TripRecord {
            rideable_type: ride.into(),
            start_station_id: start.into(),
            start_station_name: format!("{start} name"),
            start_lat: "1.0".into(),
            start_lng: "2.0".into(),
            end_station_id: end.into(),
            end_station_name: format!("{end} name"),
            end_lat: "3.0".into(),
            end_lng: "4.0".into(),
            member_casual: member.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ingest_counts_categories() {
        let records = vec![
            trip("A", "B", "electric", "member"),
            trip("A", "B", "electric", "member"),
            trip("A", "B", "classic", "casual"),
        ];
        let ingested = ingest(&records);

        assert_eq!(ingested.stats.complete, 3);
        assert_eq!(ingested.stats.incomplete, 0);
        assert_eq!(ingested.trip_counts.len(), 2);

        let key = TripKey {
            start_station_id: "A".into(),
            end_station_id: "B".into(),
            ride_type: "electric".into(),
            member_type: "member".into(),
        };
        assert_eq!(ingested.trip_counts[&key], 2);
        assert_eq!(
            ingested.ride_types,
            BTreeSet::from(["classic".to_string(), "electric".to_string()])
        );
        assert_eq!(
            ingested.member_types,
            BTreeSet::from(["casual".to_string(), "member".to_string()])
        );
    }

    #[test]
    fn test_incomplete_records_are_skipped() {
        let records = vec![
            trip("A", "", "electric", "member"),
            trip("", "B", "scooter", "casual"),
            trip("A", "B", "classic", "member"),
        ];
        let ingested = ingest(&records);

        assert_eq!(ingested.stats.complete, 1);
        assert_eq!(ingested.stats.incomplete, 2);
        assert_eq!(ingested.stations.len(), 2);
        assert!(!ingested.ride_types.contains("scooter"));
        assert!(!ingested.member_types.contains("casual"));
        assert_eq!(ingested.trip_counts.values().sum::<u64>(), 1);
    }

    #[test]
    fn test_first_sighting_wins() {
        let first = trip("A", "B", "classic", "member");
        let mut later = trip("C", "A", "classic", "member");
        later.end_station_name = "Renamed".into();
        later.end_lat = "9.9".into();

        let ingested = ingest(&[first, later]);
        let a = &ingested.stations["A"];

        assert_eq!(a.name, "A name");
        assert_eq!(a.lat, "1.0");
        assert_eq!(a.lng, "2.0");
    }

    #[test]
    fn test_end_station_attributes_come_from_end_fields() {
        let ingested = ingest(&[trip("A", "B", "classic", "member")]);
        let b = &ingested.stations["B"];

        assert_eq!(b.name, "B name");
        assert_eq!(b.lat, "3.0");
        assert_eq!(b.lng, "4.0");
    }

    #[test]
    fn test_round_trip_registers_station_once() {
        let ingested = ingest(&[trip("A", "A", "classic", "member")]);

        assert_eq!(ingested.stations.len(), 1);
        assert_eq!(ingested.stations["A"].name, "A name");
    }

    #[test]
    fn test_ingest_empty() {
        let ingested = ingest(&Vec::<TripRecord>::new());
        assert_eq!(ingested.stats, IngestStats::default());
        assert!(ingested.stations.is_empty());
        assert!(ingested.trip_counts.is_empty());
    }
}
