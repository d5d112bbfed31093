use std::borrow::Borrow;

use crate::fields::RouteField;
use crate::metrics::ProcessedRoute;

fn ranked<'a, R: Borrow<ProcessedRoute>>(
    routes: &'a [R],
    field: RouteField,
    limit: usize,
    descending: bool,
) -> Vec<&'a ProcessedRoute> {
    let value = |r: &ProcessedRoute| field.numeric_value(r).unwrap_or(0.0);

    let mut sorted: Vec<&ProcessedRoute> = routes
        .iter()
        .map(<R as Borrow<ProcessedRoute>>::borrow)
        .collect();

    // sort_by is stable, so ties keep input order in both directions
    if descending {
        sorted.sort_by(|a, b| value(b).total_cmp(&value(a)));
    } else {
        sorted.sort_by(|a, b| value(a).total_cmp(&value(b)));
    }

    sorted.truncate(limit);
    sorted
}

/// The `limit` routes with the highest value of `field`.
///
/// Non-numeric fields rank every route as 0, which leaves input order intact.
pub fn top_by_field<R: Borrow<ProcessedRoute>>(
    routes: &[R],
    field: RouteField,
    limit: usize,
) -> Vec<&ProcessedRoute> {
    ranked(routes, field, limit, true)
}

/// The `limit` routes with the lowest value of `field`.
pub fn bottom_by_field<R: Borrow<ProcessedRoute>>(
    routes: &[R],
    field: RouteField,
    limit: usize,
) -> Vec<&ProcessedRoute> {
    ranked(routes, field, limit, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::enrich;
    use crate::model::RouteRecord;

    fn routes() -> Vec<ProcessedRoute> {
        // (number, length, duration) -> speeds 30, 60, 30, 15
        let raw = [("1", 10.0, 20.0), ("2", 20.0, 20.0), ("3", 5.0, 10.0), ("4", 5.0, 20.0)]
            .into_iter()
            .map(|(number, length, duration)| RouteRecord {
                number: number.to_string(),
                route_length: Some(length),
                duration_minutes: Some(duration),
                ..Default::default()
            })
            .collect();
        enrich(raw)
    }

    fn numbers(routes: &[&ProcessedRoute]) -> Vec<String> {
        routes.iter().map(|r| r.route.number.clone()).collect()
    }

    #[test]
    fn test_top_by_speed_is_stable() {
        let routes = routes();
        let top = top_by_field(&routes, RouteField::AvgSpeed, 3);
        assert_eq!(numbers(&top), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_limit_larger_than_input() {
        let routes = routes();
        assert_eq!(top_by_field(&routes, RouteField::RouteLength, 50).len(), 4);
        assert!(top_by_field(&routes, RouteField::RouteLength, 0).is_empty());
    }

    #[test]
    fn test_non_numeric_field_keeps_order() {
        let routes = routes();
        let top = top_by_field(&routes, RouteField::Carrier, 4);
        assert_eq!(numbers(&top), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_bottom_by_speed() {
        let routes = routes();
        let bottom = bottom_by_field(&routes, RouteField::AvgSpeed, 2);
        assert_eq!(numbers(&bottom), vec!["4", "1"]);
    }
}
