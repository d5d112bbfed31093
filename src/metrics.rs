use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::RouteRecord;

/// A [`RouteRecord`] together with the metrics derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRoute {
    #[serde(flatten)]
    pub route: RouteRecord,

    /// km/h
    pub avg_speed: f64,
    pub stop_count: usize,
    /// Stops per kilometre.
    pub stop_density: f64,
    pub avg_distance_between_stops: f64,
    pub transport_hub_count: usize,
    pub tariff_major_units: f64,
}

impl ProcessedRoute {
    /// Derives metrics for a single record.
    ///
    /// Returns `None` when the route length or duration is missing, zero,
    /// negative or NaN. Such records cannot produce a speed.
    pub fn from_record(route: RouteRecord) -> Option<Self> {
        let length = positive(route.route_length)?;
        let duration = positive(route.duration_minutes)?;

        let stop_count = route.stops.len();
        let transport_hub_count = route.stops.iter().filter(|s| s.is_transport_hub()).count();

        let avg_distance_between_stops = if stop_count == 0 {
            0.0
        } else {
            length / stop_count as f64
        };

        Some(ProcessedRoute {
            avg_speed: length / duration * 60.0,
            stop_count,
            stop_density: stop_count as f64 / length,
            avg_distance_between_stops,
            transport_hub_count,
            tariff_major_units: route.tariff.unwrap_or(0.0) / 100.0,
            route,
        })
    }

    /// Route length in km. Always positive for a processed route.
    pub fn length(&self) -> f64 {
        self.route.route_length.unwrap_or(0.0)
    }

    pub fn duration_minutes(&self) -> f64 {
        self.route.duration_minutes.unwrap_or(0.0)
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Enriches raw records, dropping those that cannot produce a speed.
///
/// Output order matches input order.
pub fn enrich(raw: Vec<RouteRecord>) -> Vec<ProcessedRoute> {
    let total = raw.len();
    let processed: Vec<ProcessedRoute> = raw
        .into_iter()
        .filter_map(ProcessedRoute::from_record)
        .collect();

    let dropped = total - processed.len();
    if dropped > 0 {
        debug!(
            total,
            dropped, "Dropped routes with missing or zero length/duration"
        );
    }

    processed
}
