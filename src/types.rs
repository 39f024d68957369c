//! Data types shared by the ingest and aggregation stages.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single row deserialized from the trip-history CSV.
///
/// Every column defaults to an empty string when it is absent from the
/// header, so a missing station id column behaves like an empty cell.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TripRecord {
    pub ride_id: String,
    pub rideable_type: String,
    pub started_at: String,
    pub ended_at: String,
    pub start_station_name: String,
    pub start_station_id: String,
    pub end_station_name: String,
    pub end_station_id: String,
    pub start_lat: String,
    pub start_lng: String,
    pub end_lat: String,
    pub end_lng: String,
    pub member_casual: String,
}

impl TripRecord {
    /// Both station ids are present.
    pub fn is_complete(&self) -> bool {
        !self.start_station_id.is_empty() && !self.end_station_id.is_empty()
    }

    pub fn start_station(&self) -> Station {
        Station {
            id: self.start_station_id.clone(),
            name: self.start_station_name.clone(),
            lat: self.start_lat.clone(),
            lng: self.start_lng.clone(),
        }
    }

    pub fn end_station(&self) -> Station {
        Station {
            id: self.end_station_id.clone(),
            name: self.end_station_name.clone(),
            lat: self.end_lat.clone(),
            lng: self.end_lng.clone(),
        }
    }
}

/// A pickup/drop-off point, fixed at its first sighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub lat: String,
    pub lng: String,
}

/// Key of the categorized trip multiset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripKey {
    pub start_station_id: String,
    pub end_station_id: String,
    pub ride_type: String,
    pub member_type: String,
}

/// Trip volume for one station pair, sliced by ride and member type.
///
/// [`TripCounts::record`] and [`TripCounts::add`] update all four views
/// together, so each per-dimension map sums to `total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripCounts {
    pub total: u64,
    pub by_ride_type: BTreeMap<String, u64>,
    pub by_member_type: BTreeMap<String, u64>,
    pub by_ride_type_and_member_type: BTreeMap<String, BTreeMap<String, u64>>,
}

impl TripCounts {
    /// An all-zero counter with a key for every discovered label.
    pub fn zeroed(ride_types: &BTreeSet<String>, member_types: &BTreeSet<String>) -> Self {
        let zero_members: BTreeMap<String, u64> =
            member_types.iter().map(|m| (m.clone(), 0)).collect();

        TripCounts {
            total: 0,
            by_ride_type: ride_types.iter().map(|r| (r.clone(), 0)).collect(),
            by_member_type: zero_members.clone(),
            by_ride_type_and_member_type: ride_types
                .iter()
                .map(|r| (r.clone(), zero_members.clone()))
                .collect(),
        }
    }

    /// Adds `count` trips of one exact (ride type, member type) combination.
    pub fn record(&mut self, ride_type: &str, member_type: &str, count: u64) {
        self.total += count;
        *self.by_ride_type.entry(ride_type.to_string()).or_default() += count;
        *self
            .by_member_type
            .entry(member_type.to_string())
            .or_default() += count;
        *self
            .by_ride_type_and_member_type
            .entry(ride_type.to_string())
            .or_default()
            .entry(member_type.to_string())
            .or_default() += count;
    }

    /// Merges another counter into this one key by key.
    pub fn add(&mut self, other: &TripCounts) {
        self.total += other.total;
        for (ride_type, count) in &other.by_ride_type {
            *self.by_ride_type.entry(ride_type.clone()).or_default() += count;
        }
        for (member_type, count) in &other.by_member_type {
            *self.by_member_type.entry(member_type.clone()).or_default() += count;
        }
        for (ride_type, by_member) in &other.by_ride_type_and_member_type {
            let row = self
                .by_ride_type_and_member_type
                .entry(ride_type.clone())
                .or_default();
            for (member_type, count) in by_member {
                *row.entry(member_type.clone()).or_default() += count;
            }
        }
    }
}

/// Aggregated trips between one ordered pair of stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedTrip {
    pub start_station_id: String,
    pub end_station_id: String,
    pub trip_counts: TripCounts,
}

impl AggregatedTrip {
    pub fn is_round_trip(&self) -> bool {
        self.start_station_id == self.end_station_id
    }
}

/// The output document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSummary {
    pub stations: Vec<Station>,
    pub aggregated_trips: Vec<AggregatedTrip>,
}

/// Combined trip volume touching one station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationActivity {
    pub station_id: String,
    pub starting: TripCounts,
    pub ending: TripCounts,
    pub round_trips: u64,
}

impl StationActivity {
    pub fn total(&self) -> u64 {
        self.starting.total + self.ending.total
    }
}
