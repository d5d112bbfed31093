//! Map framing for a set of routes.

use std::borrow::Borrow;

use geo_types::{Coord, Rect, coord};

use crate::metrics::ProcessedRoute;

/// Map center used when no route has usable coordinates, as `(lat, lon)`.
pub const DEFAULT_CENTER: (f64, f64) = (40.4093, 49.8671);

/// All usable `(lat, lon)` points of a route: stop positions followed by the
/// flow coordinates of every variant.
pub fn route_points(route: &ProcessedRoute) -> impl Iterator<Item = (f64, f64)> + '_ {
    let stops = route
        .route
        .stops
        .iter()
        .filter_map(|s| s.stop.as_ref().and_then(|loc| loc.position()));

    let flows = route
        .route
        .routes
        .iter()
        .flat_map(|v| v.flow_coordinates.iter())
        .filter_map(|c| c.position());

    stops.chain(flows)
}

/// Bounding box of every stop and flow coordinate, with `x` as longitude and
/// `y` as latitude. `None` when no route has a usable coordinate.
pub fn network_bounds<R: Borrow<ProcessedRoute>>(routes: &[R]) -> Option<Rect<f64>> {
    let mut min: Option<Coord<f64>> = None;
    let mut max: Option<Coord<f64>> = None;

    for r in routes.iter().map(<R as Borrow<ProcessedRoute>>::borrow) {
        for (lat, lon) in route_points(r) {
            let p = coord! { x: lon, y: lat };
            min = Some(match min {
                Some(m) => coord! { x: m.x.min(p.x), y: m.y.min(p.y) },
                None => p,
            });
            max = Some(match max {
                Some(m) => coord! { x: m.x.max(p.x), y: m.y.max(p.y) },
                None => p,
            });
        }
    }

    Some(Rect::new(min?, max?))
}

/// Center of `bounds` as `(lat, lon)`, or [`DEFAULT_CENTER`].
pub fn map_center(bounds: Option<&Rect<f64>>) -> (f64, f64) {
    match bounds {
        Some(b) => {
            let c = b.center();
            (c.y, c.x)
        }
        None => DEFAULT_CENTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::enrich;
    use crate::model::{FlowCoordinate, RouteRecord, RouteVariant, Stop, StopLocation};
    use approx::assert_relative_eq;

    fn stop_at(lat: &str, lon: &str) -> Stop {
        Stop {
            stop: Some(StopLocation {
                latitude: lat.to_string(),
                longitude: lon.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn route(stops: Vec<Stop>, flow: Vec<(f64, f64)>) -> RouteRecord {
        RouteRecord {
            route_length: Some(10.0),
            duration_minutes: Some(20.0),
            stops,
            routes: vec![RouteVariant {
                flow_coordinates: flow
                    .into_iter()
                    .enumerate()
                    .map(|(i, (lat, lon))| FlowCoordinate {
                        lat,
                        lon,
                        sequence: i as i64,
                    })
                    .collect(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_bounds_cover_stops_and_flow() {
        let routes = enrich(vec![
            route(vec![stop_at("40.30", "49.80"), stop_at("0", "0")], vec![]),
            route(vec![], vec![(40.50, 49.95), (0.0, 49.9)]),
        ]);

        let bounds = network_bounds(&routes).unwrap();
        assert_relative_eq!(bounds.min().y, 40.30);
        assert_relative_eq!(bounds.min().x, 49.80);
        assert_relative_eq!(bounds.max().y, 40.50);
        assert_relative_eq!(bounds.max().x, 49.95);

        let (lat, lon) = map_center(Some(&bounds));
        assert_relative_eq!(lat, 40.40, epsilon = 1e-9);
        assert_relative_eq!(lon, 49.875, epsilon = 1e-9);
    }

    #[test]
    fn test_no_coordinates() {
        let routes = enrich(vec![route(vec![stop_at("bad", "49.8")], vec![])]);
        let bounds = network_bounds(&routes);
        assert!(bounds.is_none());
        assert_eq!(map_center(bounds.as_ref()), DEFAULT_CENTER);
    }
}
