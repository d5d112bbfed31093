//! Named route fields used for ranking, sorting, grouping and unique-value
//! extraction.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::metrics::ProcessedRoute;

/// A column of a [`ProcessedRoute`].
///
/// Numeric fields answer [`RouteField::numeric_value`]; text and category
/// fields answer [`RouteField::text_value`] (categories yield their name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RouteField {
    Id,
    Number,
    Carrier,
    FirstPoint,
    LastPoint,
    TariffDisplay,
    Region,
    PaymentType,
    WorkingZone,
    RouteLength,
    DurationMinutes,
    Tariff,
    AvgSpeed,
    StopCount,
    StopDensity,
    AvgDistanceBetweenStops,
    TransportHubCount,
    TariffMajorUnits,
}

impl RouteField {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            RouteField::Id
                | RouteField::RouteLength
                | RouteField::DurationMinutes
                | RouteField::Tariff
                | RouteField::AvgSpeed
                | RouteField::StopCount
                | RouteField::StopDensity
                | RouteField::AvgDistanceBetweenStops
                | RouteField::TransportHubCount
                | RouteField::TariffMajorUnits
        )
    }

    pub fn numeric_value(self, r: &ProcessedRoute) -> Option<f64> {
        match self {
            RouteField::Id => Some(r.route.id as f64),
            RouteField::RouteLength => r.route.route_length,
            RouteField::DurationMinutes => r.route.duration_minutes,
            RouteField::Tariff => r.route.tariff,
            RouteField::AvgSpeed => Some(r.avg_speed),
            RouteField::StopCount => Some(r.stop_count as f64),
            RouteField::StopDensity => Some(r.stop_density),
            RouteField::AvgDistanceBetweenStops => Some(r.avg_distance_between_stops),
            RouteField::TransportHubCount => Some(r.transport_hub_count as f64),
            RouteField::TariffMajorUnits => Some(r.tariff_major_units),
            _ => None,
        }
    }

    pub fn text_value(self, r: &ProcessedRoute) -> Option<&str> {
        match self {
            RouteField::Number => Some(&r.route.number),
            RouteField::Carrier => Some(&r.route.carrier),
            RouteField::FirstPoint => Some(&r.route.first_point),
            RouteField::LastPoint => Some(&r.route.last_point),
            RouteField::TariffDisplay => Some(&r.route.tariff_display),
            RouteField::Region => r.route.region_name(),
            RouteField::PaymentType => r.route.payment_type_name(),
            RouteField::WorkingZone => r.route.working_zone_name(),
            _ => None,
        }
    }

    /// Column header used in reports.
    pub fn label(self) -> &'static str {
        match self {
            RouteField::Id => "id",
            RouteField::Number => "number",
            RouteField::Carrier => "carrier",
            RouteField::FirstPoint => "first_point",
            RouteField::LastPoint => "last_point",
            RouteField::TariffDisplay => "tariff_display",
            RouteField::Region => "region",
            RouteField::PaymentType => "payment_type",
            RouteField::WorkingZone => "working_zone",
            RouteField::RouteLength => "route_length",
            RouteField::DurationMinutes => "duration_minutes",
            RouteField::Tariff => "tariff",
            RouteField::AvgSpeed => "avg_speed",
            RouteField::StopCount => "stop_count",
            RouteField::StopDensity => "stop_density",
            RouteField::AvgDistanceBetweenStops => "avg_distance_between_stops",
            RouteField::TransportHubCount => "transport_hub_count",
            RouteField::TariffMajorUnits => "tariff_major_units",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, RouteRecord};

    fn route() -> ProcessedRoute {
        ProcessedRoute::from_record(RouteRecord {
            id: 3,
            number: "88".to_string(),
            carrier: "Avtoservis".to_string(),
            route_length: Some(10.0),
            duration_minutes: Some(20.0),
            region: Some(Category {
                id: 2,
                name: "Sabail".to_string(),
            }),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_numeric_and_text_are_disjoint() {
        let r = route();
        for field in RouteField::value_variants() {
            let numeric = field.numeric_value(&r).is_some();
            let text = field.text_value(&r).is_some();
            assert!(!(numeric && text), "{:?} answers both", field);
        }
    }

    #[test]
    fn test_is_numeric_matches_accessor() {
        let r = route();
        for field in RouteField::value_variants() {
            if field.is_numeric() {
                assert!(field.numeric_value(&r).is_some(), "{:?}", field);
            }
        }
    }

    #[test]
    fn test_category_fields_yield_name() {
        let r = route();
        assert_eq!(RouteField::Region.text_value(&r), Some("Sabail"));
        assert_eq!(RouteField::PaymentType.text_value(&r), None);
        assert_eq!(RouteField::AvgSpeed.numeric_value(&r), Some(30.0));
    }
}
