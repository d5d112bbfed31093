//! Result types produced by the aggregation functions.

use serde::Serialize;

use crate::analyzers::utility::format_number;

/// Fleet-wide KPIs over a set of routes. Means are exact; use
/// [`KpiSummary::display`] for one-decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_routes: usize,
    pub total_distance: f64,
    pub avg_speed: f64,
    pub avg_length: f64,
    pub total_stops: usize,
    pub total_hubs: usize,
    pub carriers: usize,
    /// Distinct regions; routes without one count as a single "Unknown" region.
    pub regions: usize,
    pub avg_stops_per_route: f64,
    pub avg_tariff: f64,
    pub fastest: RouteExtreme,
    pub slowest: RouteExtreme,
    pub longest: RouteExtreme,
}

/// The route holding an extreme value. Ties go to the first route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteExtreme {
    pub number: String,
    pub value: f64,
}

/// [`KpiSummary`] rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiDisplay {
    pub total_routes: usize,
    pub total_distance: String,
    pub avg_speed: String,
    pub avg_length: String,
    pub total_stops: usize,
    pub total_hubs: usize,
    pub carriers: usize,
    pub regions: usize,
    pub avg_stops_per_route: String,
    pub avg_tariff: String,
    pub fastest: String,
    pub slowest: String,
    pub longest: String,
}

impl KpiSummary {
    pub fn display(&self) -> KpiDisplay {
        KpiDisplay {
            total_routes: self.total_routes,
            total_distance: format_number(self.total_distance, 1),
            avg_speed: format_number(self.avg_speed, 1),
            avg_length: format_number(self.avg_length, 1),
            total_stops: self.total_stops,
            total_hubs: self.total_hubs,
            carriers: self.carriers,
            regions: self.regions,
            avg_stops_per_route: format_number(self.avg_stops_per_route, 1),
            avg_tariff: format_number(self.avg_tariff, 2),
            fastest: format!("{} ({} km/h)", self.fastest.number, format_number(self.fastest.value, 1)),
            slowest: format!("{} ({} km/h)", self.slowest.number, format_number(self.slowest.value, 1)),
            longest: format!("{} ({} km)", self.longest.number, format_number(self.longest.value, 1)),
        }
    }
}

/// Rollup of the routes sharing one value of a category (carrier, region...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub name: String,
    pub route_count: usize,
    pub total_distance: f64,
    pub avg_speed: f64,
}

/// Occurrences of one distinct value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
    pub share_percent: f64,
}

/// One half-open `[min, max)` histogram bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    pub share_percent: f64,
}
