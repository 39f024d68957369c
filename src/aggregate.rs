//! Expands categorized trip counts into the summary document.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use tracing::info;

use crate::ingest::Ingested;
use crate::types::{AggregatedTrip, TripCounts, TripSummary};

/// Groups the categorized counts by station pair and builds a [`TripSummary`].
///
/// Every [`TripCounts`] carries a key for each ride and member type seen
/// anywhere in the input, zero where the pair has no such trips. Stations are
/// sorted by id; trips by total descending, then start id, then end id.
pub fn aggregate(ingested: &Ingested) -> TripSummary {
    let empty = TripCounts::zeroed(&ingested.ride_types, &ingested.member_types);

    let mut by_pair: BTreeMap<(&str, &str), TripCounts> = BTreeMap::new();
    for (key, count) in &ingested.trip_counts {
        by_pair
            .entry((key.start_station_id.as_str(), key.end_station_id.as_str()))
            .or_insert_with(|| empty.clone())
            .record(&key.ride_type, &key.member_type, *count);
    }

    let mut aggregated_trips: Vec<AggregatedTrip> = by_pair
        .into_iter()
        .map(|((start, end), trip_counts)| AggregatedTrip {
            start_station_id: start.to_string(),
            end_station_id: end.to_string(),
            trip_counts,
        })
        .collect();

    aggregated_trips.sort_by(|a, b| {
        Reverse(a.trip_counts.total)
            .cmp(&Reverse(b.trip_counts.total))
            .then_with(|| a.start_station_id.cmp(&b.start_station_id))
            .then_with(|| a.end_station_id.cmp(&b.end_station_id))
    });

    let mut stations: Vec<_> = ingested.stations.values().cloned().collect();
    stations.sort_by(|a, b| a.id.cmp(&b.id));

    info!(
        stations = stations.len(),
        aggregated_trips = aggregated_trips.len(),
        "Trips aggregated"
    );

    TripSummary {
        stations,
        aggregated_trips,
    }
}
