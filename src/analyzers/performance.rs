//! Route performance: speed against coverage quadrants, the duration trend
//! over distance, and median stop density.

use std::borrow::Borrow;

use serde::Serialize;

use crate::analyzers::utility::{median, pct};
use crate::metrics::ProcessedRoute;

/// Position of a route relative to the median speed and median stop count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    /// Fast with many stops.
    HighCoverage,
    /// Fast with few stops.
    Express,
    /// Slow with many stops.
    NeedsOptimization,
    /// Slow with few stops.
    NeedsReview,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::HighCoverage,
        Quadrant::Express,
        Quadrant::NeedsOptimization,
        Quadrant::NeedsReview,
    ];

    /// Values at the median count as high.
    pub fn classify(route: &ProcessedRoute, median_speed: f64, median_stops: f64) -> Self {
        let fast = route.avg_speed >= median_speed;
        let covered = route.stop_count as f64 >= median_stops;
        match (fast, covered) {
            (true, true) => Quadrant::HighCoverage,
            (true, false) => Quadrant::Express,
            (false, true) => Quadrant::NeedsOptimization,
            (false, false) => Quadrant::NeedsReview,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::HighCoverage => "High Coverage / High Efficiency",
            Quadrant::Express => "Express / High Efficiency",
            Quadrant::NeedsOptimization => "High Coverage / Needs Optimization",
            Quadrant::NeedsReview => "Low Coverage / Needs Review",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadrantCount {
    pub quadrant: Quadrant,
    pub label: &'static str,
    pub count: usize,
    pub share_percent: f64,
}

/// Quadrant split of a set of routes. Every quadrant is listed, empty or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMatrix {
    pub median_speed: f64,
    pub median_stops: f64,
    pub quadrants: Vec<QuadrantCount>,
}

/// Classifies every route against the medians of the same set. Returns
/// `None` for an empty input.
pub fn performance_matrix<R: Borrow<ProcessedRoute>>(routes: &[R]) -> Option<PerformanceMatrix> {
    let routes: Vec<&ProcessedRoute> = routes
        .iter()
        .map(<R as Borrow<ProcessedRoute>>::borrow)
        .collect();

    let speeds: Vec<f64> = routes.iter().map(|r| r.avg_speed).collect();
    let stops: Vec<f64> = routes.iter().map(|r| r.stop_count as f64).collect();
    let median_speed = median(&speeds)?;
    let median_stops = median(&stops)?;

    let mut counts = [0usize; 4];
    for r in &routes {
        let q = Quadrant::classify(r, median_speed, median_stops);
        if let Some(i) = Quadrant::ALL.iter().position(|&a| a == q) {
            counts[i] += 1;
        }
    }

    let quadrants = Quadrant::ALL
        .iter()
        .zip(counts)
        .map(|(&quadrant, count)| QuadrantCount {
            quadrant,
            label: quadrant.label(),
            count,
            share_percent: pct(count, routes.len()),
        })
        .collect();

    Some(PerformanceMatrix {
        median_speed,
        median_stops,
        quadrants,
    })
}

/// Least-squares slope of duration over length, in minutes per kilometre.
///
/// `None` with fewer than two routes or when every route has the same length.
pub fn duration_trend<R: Borrow<ProcessedRoute>>(routes: &[R]) -> Option<f64> {
    if routes.len() < 2 {
        return None;
    }
    let points: Vec<(f64, f64)> = routes
        .iter()
        .map(<R as Borrow<ProcessedRoute>>::borrow)
        .map(|r| (r.length(), r.duration_minutes()))
        .collect();

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (cov, var) = points.iter().fold((0.0, 0.0), |(cov, var), &(x, y)| {
        let dx = x - mean_x;
        (cov + dx * (y - mean_y), var + dx * dx)
    });

    if var == 0.0 { None } else { Some(cov / var) }
}

/// Median stops per kilometre. `None` for an empty input.
pub fn median_stop_density<R: Borrow<ProcessedRoute>>(routes: &[R]) -> Option<f64> {
    let densities: Vec<f64> = routes
        .iter()
        .map(<R as Borrow<ProcessedRoute>>::borrow)
        .map(|r| r.stop_density)
        .collect();
    median(&densities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::enrich;
    use crate::model::{RouteRecord, Stop};
    use approx::assert_relative_eq;

    fn record(length: f64, duration: f64, stops: usize) -> RouteRecord {
        RouteRecord {
            route_length: Some(length),
            duration_minutes: Some(duration),
            stops: vec![Stop::default(); stops],
            ..Default::default()
        }
    }

    #[test]
    fn test_matrix_of_empty_input() {
        let routes: Vec<ProcessedRoute> = vec![];
        assert!(performance_matrix(&routes).is_none());
        assert!(median_stop_density(&routes).is_none());
    }

    #[test]
    fn test_quadrants_split_at_medians() {
        // speeds 60, 60, 15, 15; stop counts 10, 2, 10, 2
        let routes = enrich(vec![
            record(20.0, 20.0, 10),
            record(20.0, 20.0, 2),
            record(5.0, 20.0, 10),
            record(5.0, 20.0, 2),
        ]);

        let matrix = performance_matrix(&routes).unwrap();
        assert_relative_eq!(matrix.median_speed, 37.5);
        assert_relative_eq!(matrix.median_stops, 6.0);

        let counts: Vec<usize> = matrix.quadrants.iter().map(|q| q.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 1]);
        assert_relative_eq!(matrix.quadrants[0].share_percent, 25.0);
    }

    #[test]
    fn test_median_counts_as_high() {
        let routes = enrich(vec![record(10.0, 20.0, 4)]);
        let matrix = performance_matrix(&routes).unwrap();
        assert_eq!(matrix.quadrants[0].quadrant, Quadrant::HighCoverage);
        assert_eq!(matrix.quadrants[0].count, 1);
    }

    #[test]
    fn test_duration_trend() {
        // duration = 2 * length + 10
        let routes = enrich(vec![
            record(5.0, 20.0, 0),
            record(10.0, 30.0, 0),
            record(20.0, 50.0, 0),
        ]);
        assert_relative_eq!(duration_trend(&routes).unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_duration_trend_degenerate() {
        let one = enrich(vec![record(5.0, 20.0, 0)]);
        assert!(duration_trend(&one).is_none());

        let same_length = enrich(vec![record(5.0, 20.0, 0), record(5.0, 30.0, 0)]);
        assert!(duration_trend(&same_length).is_none());
    }

    #[test]
    fn test_median_stop_density() {
        // densities 0.5, 1.0, 2.0
        let routes = enrich(vec![
            record(10.0, 20.0, 5),
            record(10.0, 20.0, 10),
            record(10.0, 20.0, 20),
        ]);
        assert_relative_eq!(median_stop_density(&routes).unwrap(), 1.0);
    }
}
