//! Per-station rollups over a [`TripSummary`].

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::types::{StationActivity, TripSummary};

/// Combines the trips starting and ending at each station.
///
/// Round trips count towards both `starting` and `ending`, and their total is
/// also kept in `round_trips`. Stations with no trips get an empty entry.
pub fn station_activity(summary: &TripSummary) -> BTreeMap<String, StationActivity> {
    let mut activity: BTreeMap<String, StationActivity> = summary
        .stations
        .iter()
        .map(|s| {
            (
                s.id.clone(),
                StationActivity {
                    station_id: s.id.clone(),
                    ..Default::default()
                },
            )
        })
        .collect();

    for trip in &summary.aggregated_trips {
        activity
            .entry(trip.start_station_id.clone())
            .or_insert_with(|| StationActivity {
                station_id: trip.start_station_id.clone(),
                ..Default::default()
            })
            .starting
            .add(&trip.trip_counts);

        let end = activity
            .entry(trip.end_station_id.clone())
            .or_insert_with(|| StationActivity {
                station_id: trip.end_station_id.clone(),
                ..Default::default()
            });
        end.ending.add(&trip.trip_counts);
        if trip.is_round_trip() {
            end.round_trips += trip.trip_counts.total;
        }
    }

    activity
}

/// The `n` stations with the most starting plus ending trips, ties by id.
pub fn busiest_stations(summary: &TripSummary, n: usize) -> Vec<StationActivity> {
    let mut ranked: Vec<_> = station_activity(summary).into_values().collect();
    ranked.sort_by_key(|a| (Reverse(a.total()), a.station_id.clone()));
    ranked.truncate(n);
    ranked
}
