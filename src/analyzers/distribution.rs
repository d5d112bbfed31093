use std::borrow::Borrow;

use crate::analyzers::types::Bucket;
use crate::analyzers::utility::pct;
use crate::metrics::ProcessedRoute;

/// Average speed buckets, km/h.
///
/// | Label     | Range        |
/// |-----------|--------------|
/// | 36.0-36.5 | [36.0, 36.5) |
/// | 36.5-37.0 | [36.5, 37.0) |
/// | 37.0-37.5 | [37.0, 37.5) |
/// | 37.5-38.0 | [37.5, 38.0) |
/// | 38.0+     | [38.0, 100)  |
pub static SPEED_BUCKETS: &[(&str, f64, f64)] = &[
    ("36.0-36.5", 36.0, 36.5),
    ("36.5-37.0", 36.5, 37.0),
    ("37.0-37.5", 37.0, 37.5),
    ("37.5-38.0", 37.5, 38.0),
    ("38.0+", 38.0, 100.0),
];

/// Route length buckets, km.
pub static LENGTH_BUCKETS: &[(&str, f64, f64)] = &[
    ("0-10 km", 0.0, 10.0),
    ("10-20 km", 10.0, 20.0),
    ("20-30 km", 20.0, 30.0),
    ("30-40 km", 30.0, 40.0),
    ("40+ km", 40.0, 1000.0),
];

/// Counts routes into half-open buckets. A value lands in the first bucket
/// containing it; values outside every bucket are not counted, but still
/// count towards the share denominator.
pub fn distribution<R, F>(routes: &[R], buckets: &[(&str, f64, f64)], value: F) -> Vec<Bucket>
where
    R: Borrow<ProcessedRoute>,
    F: Fn(&ProcessedRoute) -> f64,
{
    let mut counts = vec![0usize; buckets.len()];

    for r in routes.iter().map(<R as Borrow<ProcessedRoute>>::borrow) {
        let v = value(r);
        if let Some(i) = buckets.iter().position(|(_, min, max)| v >= *min && v < *max) {
            counts[i] += 1;
        }
    }

    buckets
        .iter()
        .zip(counts)
        .map(|((label, min, max), count)| Bucket {
            label: label.to_string(),
            min: *min,
            max: *max,
            count,
            share_percent: pct(count, routes.len()),
        })
        .collect()
}

pub fn speed_distribution<R: Borrow<ProcessedRoute>>(routes: &[R]) -> Vec<Bucket> {
    distribution(routes, SPEED_BUCKETS, |r| r.avg_speed)
}

pub fn length_distribution<R: Borrow<ProcessedRoute>>(routes: &[R]) -> Vec<Bucket> {
    distribution(routes, LENGTH_BUCKETS, ProcessedRoute::length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::enrich;
    use crate::model::RouteRecord;
    use approx::assert_relative_eq;

    fn with_length(lengths: &[f64]) -> Vec<ProcessedRoute> {
        enrich(
            lengths
                .iter()
                .map(|l| RouteRecord {
                    route_length: Some(*l),
                    duration_minutes: Some(60.0),
                    ..Default::default()
                })
                .collect(),
        )
    }

    fn counts(buckets: &[Bucket]) -> Vec<usize> {
        buckets.iter().map(|b| b.count).collect()
    }

    #[test]
    fn test_length_bucket_boundaries() {
        let routes = with_length(&[5.0, 10.0, 19.9, 20.0, 39.99, 40.0, 75.0]);
        let buckets = length_distribution(&routes);
        assert_eq!(counts(&buckets), vec![1, 2, 1, 1, 2]);
        assert_eq!(buckets[4].label, "40+ km");
    }

    #[test]
    fn test_speed_outside_buckets_not_counted() {
        let speeds = [30.0, 36.0, 36.5, 37.9, 38.0, 120.0];
        let mut routes = with_length(&[1.0; 6]);
        for (r, speed) in routes.iter_mut().zip(speeds) {
            r.avg_speed = speed;
        }

        let buckets = speed_distribution(&routes);
        assert_eq!(counts(&buckets), vec![1, 1, 0, 1, 1]);
        assert_relative_eq!(buckets[0].share_percent, 100.0 / 6.0);
    }

    #[test]
    fn test_empty_input_has_zero_shares() {
        let routes: Vec<ProcessedRoute> = vec![];
        let buckets = length_distribution(&routes);
        assert_eq!(buckets.len(), LENGTH_BUCKETS.len());
        assert!(buckets.iter().all(|b| b.count == 0 && b.share_percent == 0.0));
    }
}
