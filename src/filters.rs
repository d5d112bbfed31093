//! Filter criteria applied to the processed route set.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::metrics::ProcessedRoute;

/// Optional, conjunctive filter criteria.
///
/// An empty membership list imposes no constraint. Numeric bounds are
/// inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    pub carriers: Vec<String>,
    pub regions: Vec<String>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_length: Option<f64>,
    pub max_length: Option<f64>,
    pub route_numbers: Vec<String>,
    pub payment_types: Vec<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn carriers<I, S>(mut self, carriers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.carriers = carriers.into_iter().map(Into::into).collect();
        self
    }

    pub fn regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn route_numbers<I, S>(mut self, numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.route_numbers = numbers.into_iter().map(Into::into).collect();
        self
    }

    pub fn payment_types<I, S>(mut self, payment_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payment_types = payment_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn speed_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_speed = min;
        self.max_speed = max;
        self
    }

    pub fn length_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
            && self.regions.is_empty()
            && self.route_numbers.is_empty()
            && self.payment_types.is_empty()
            && self.min_speed.is_none()
            && self.max_speed.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
    }

    /// Returns true when `route` satisfies every populated criterion.
    pub fn matches(&self, route: &ProcessedRoute) -> bool {
        let r = &route.route;

        contains(&self.carriers, Some(r.carrier.as_str()))
            && contains(&self.regions, r.region_name())
            && contains(&self.route_numbers, Some(r.number.as_str()))
            && contains(&self.payment_types, r.payment_type_name())
            && within(route.avg_speed, self.min_speed, self.max_speed)
            && within(route.length(), self.min_length, self.max_length)
    }
}

fn contains(allowed: &[String], value: Option<&str>) -> bool {
    if allowed.is_empty() {
        return true;
    }
    match value {
        Some(v) => allowed.iter().any(|a| a == v),
        None => false,
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m)
}

/// Narrows `routes` to those matching `criteria`, preserving order.
///
/// The result borrows the input elements; nothing is cloned.
pub fn apply_filters<'a, R>(routes: &'a [R], criteria: &FilterCriteria) -> Vec<&'a ProcessedRoute>
where
    R: Borrow<ProcessedRoute>,
{
    routes
        .iter()
        .map(<R as Borrow<ProcessedRoute>>::borrow)
        .filter(|r| criteria.matches(r))
        .collect()
}
