use std::borrow::Borrow;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::analyzers::types::{GroupStats, KpiSummary, RouteExtreme, ValueCount};
use crate::analyzers::utility::{mean, pct};
use crate::fields::RouteField;
use crate::metrics::ProcessedRoute;

/// Label for routes that carry no value for a grouping field.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Computes fleet-wide KPIs. Returns `None` for an empty input.
pub fn summarize<R: Borrow<ProcessedRoute>>(routes: &[R]) -> Option<KpiSummary> {
    if routes.is_empty() {
        return None;
    }

    let total_routes = routes.len();
    let n = total_routes as f64;

    let mut total_distance = 0.0;
    let mut speed_sum = 0.0;
    let mut tariff_sum = 0.0;
    let mut total_stops = 0;
    let mut total_hubs = 0;
    let mut carriers = HashSet::new();
    let mut regions = HashSet::new();

    let first = <R as Borrow<ProcessedRoute>>::borrow(&routes[0]);
    let mut fastest = first;
    let mut slowest = first;
    let mut longest = first;

    for r in routes.iter().map(<R as Borrow<ProcessedRoute>>::borrow) {
        if r.avg_speed > fastest.avg_speed {
            fastest = r;
        }
        if r.avg_speed < slowest.avg_speed {
            slowest = r;
        }
        if r.length() > longest.length() {
            longest = r;
        }
        regions.insert(r.route.region_name().unwrap_or(UNKNOWN_GROUP));
        total_distance += r.length();
        speed_sum += r.avg_speed;
        tariff_sum += r.tariff_major_units;
        total_stops += r.stop_count;
        total_hubs += r.transport_hub_count;
        carriers.insert(r.route.carrier.as_str());
    }

    Some(KpiSummary {
        total_routes,
        total_distance,
        avg_speed: speed_sum / n,
        avg_length: total_distance / n,
        total_stops,
        total_hubs,
        carriers: carriers.len(),
        regions: regions.len(),
        avg_stops_per_route: total_stops as f64 / n,
        avg_tariff: tariff_sum / n,
        fastest: extreme(fastest, fastest.avg_speed),
        slowest: extreme(slowest, slowest.avg_speed),
        longest: extreme(longest, longest.length()),
    })
}

fn extreme(route: &ProcessedRoute, value: f64) -> RouteExtreme {
    RouteExtreme {
        number: route.route.number.clone(),
        value,
    }
}

/// Distinct text values of `field`, sorted ascending.
///
/// Category fields contribute their name. Numeric fields contribute nothing.
pub fn unique_values<R: Borrow<ProcessedRoute>>(routes: &[R], field: RouteField) -> Vec<String> {
    routes
        .iter()
        .map(<R as Borrow<ProcessedRoute>>::borrow)
        .filter_map(|r| field.text_value(r))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Grouping key of a route for `field`: the text value, or the numeric
/// value printed, or [`UNKNOWN_GROUP`].
fn group_key(route: &ProcessedRoute, field: RouteField) -> String {
    if let Some(text) = field.text_value(route) {
        return text.to_string();
    }
    match field.numeric_value(route) {
        Some(v) => v.to_string(),
        None => UNKNOWN_GROUP.to_string(),
    }
}

/// Groups routes by `field` keeping first-encountered order.
fn grouped<'a, R: Borrow<ProcessedRoute>>(
    routes: &'a [R],
    field: RouteField,
) -> Vec<(String, Vec<&'a ProcessedRoute>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&ProcessedRoute>)> = Vec::new();

    for r in routes.iter().map(<R as Borrow<ProcessedRoute>>::borrow) {
        let key = group_key(r, field);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(r),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![r]));
            }
        }
    }

    groups
}

/// Rolls routes up by `field`: route count, summed length and mean speed
/// per group, ordered by descending route count. Ties keep first-encountered
/// order.
pub fn group_stats<R: Borrow<ProcessedRoute>>(routes: &[R], field: RouteField) -> Vec<GroupStats> {
    let mut stats: Vec<GroupStats> = grouped(routes, field)
        .into_iter()
        .map(|(name, members)| {
            let route_count = members.len();
            let total_distance = members.iter().map(|r| r.length()).sum();
            let speeds: Vec<f64> = members.iter().map(|r| r.avg_speed).collect();
            GroupStats {
                name,
                route_count,
                total_distance,
                avg_speed: mean(&speeds),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.route_count.cmp(&a.route_count));
    stats
}

/// Per-carrier rollup, ordered by descending route count.
pub fn carrier_stats<R: Borrow<ProcessedRoute>>(routes: &[R]) -> Vec<GroupStats> {
    group_stats(routes, RouteField::Carrier)
}

/// Occurrences of each distinct value of `field`, most frequent first.
pub fn value_counts<R: Borrow<ProcessedRoute>>(routes: &[R], field: RouteField) -> Vec<ValueCount> {
    let total = routes.len();
    let mut counts: Vec<ValueCount> = grouped(routes, field)
        .into_iter()
        .map(|(value, members)| ValueCount {
            value,
            count: members.len(),
            share_percent: pct(members.len(), total),
        })
        .collect();

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
