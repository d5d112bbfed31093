use std::borrow::Borrow;

use serde::Serialize;

use crate::analyzers::utility::{mean, pct};
use crate::config::InsightConfig;
use crate::metrics::ProcessedRoute;

/// Threshold counts over the displayed routes, relative to the full network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub displayed_routes: usize,
    pub total_routes: usize,
    pub fast_routes: usize,
    pub slow_routes: usize,
    pub long_routes: usize,
    pub high_density_routes: usize,
    pub avg_length: f64,
    /// Share of displayed routes that are fast.
    pub efficiency_percent: f64,
    pub slow_percent: f64,
    pub long_percent: f64,
    pub high_density_percent: f64,
    /// Displayed routes as a share of the whole network.
    pub network_share_percent: f64,
}

impl Insights {
    pub fn from_routes<R, A>(routes: &[R], all_routes: &[A], thresholds: &InsightConfig) -> Self
    where
        R: Borrow<ProcessedRoute>,
        A: Borrow<ProcessedRoute>,
    {
        let mut fast_routes = 0;
        let mut slow_routes = 0;
        let mut long_routes = 0;
        let mut high_density_routes = 0;
        let mut lengths = Vec::with_capacity(routes.len());

        for r in routes.iter().map(<R as Borrow<ProcessedRoute>>::borrow) {
            if r.avg_speed >= thresholds.fast_speed {
                fast_routes += 1;
            }
            if r.avg_speed < thresholds.slow_speed {
                slow_routes += 1;
            }
            if r.length() > thresholds.long_route_km {
                long_routes += 1;
            }
            if r.stop_density > thresholds.high_density {
                high_density_routes += 1;
            }
            lengths.push(r.length());
        }

        let n = routes.len();
        Insights {
            displayed_routes: n,
            total_routes: all_routes.len(),
            fast_routes,
            slow_routes,
            long_routes,
            high_density_routes,
            avg_length: mean(&lengths),
            efficiency_percent: pct(fast_routes, n),
            slow_percent: pct(slow_routes, n),
            long_percent: pct(long_routes, n),
            high_density_percent: pct(high_density_routes, n),
            network_share_percent: pct(n, all_routes.len()),
        }
    }
}
