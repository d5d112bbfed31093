//! Raw dataset types for the bus network JSON document.
//!
//! Field names follow the published document (camelCase). Three keys are
//! spelled differently in the published data (`routLength`,
//! `durationMinuts`, `tariffStr`); both spellings are accepted.

use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An `{id, name}` pair used for region, payment type and working zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// One bus route as it appears in the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub carrier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_point: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_point: String,
    /// Kilometres.
    #[serde(alias = "routLength")]
    pub route_length: Option<f64>,
    #[serde(alias = "durationMinuts")]
    pub duration_minutes: Option<f64>,
    /// Minor currency units.
    pub tariff: Option<f64>,
    #[serde(alias = "tariffStr", deserialize_with = "null_as_default")]
    pub tariff_display: String,
    pub region: Option<Category>,
    pub payment_type: Option<Category>,
    pub working_zone_type: Option<Category>,
    #[serde(deserialize_with = "null_as_default")]
    pub stops: Vec<Stop>,
    /// Geometric variants of the route.
    #[serde(deserialize_with = "null_as_default")]
    pub routes: Vec<RouteVariant>,
}

impl RouteRecord {
    pub fn region_name(&self) -> Option<&str> {
        self.region.as_ref().map(|c| c.name.as_str())
    }

    pub fn payment_type_name(&self) -> Option<&str> {
        self.payment_type.as_ref().map(|c| c.name.as_str())
    }

    pub fn working_zone_name(&self) -> Option<&str> {
        self.working_zone_type.as_ref().map(|c| c.name.as_str())
    }
}

/// A passenger stop along a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stop {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub stop_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stop_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total_distance: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub intermediate_distance: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub direction_type_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub bus_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub stop_id: i64,
    pub stop: Option<StopLocation>,
}

impl Stop {
    pub fn is_transport_hub(&self) -> bool {
        self.stop.as_ref().is_some_and(|s| s.is_transport_hub)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StopLocation {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name_monitor: String,
    #[serde(rename = "utmCoordX", deserialize_with = "null_as_default")]
    pub utm_coord_x: String,
    #[serde(rename = "utmCoordY", deserialize_with = "null_as_default")]
    pub utm_coord_y: String,
    /// Decimal degrees, as a string.
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: String,
    /// Decimal degrees, as a string.
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_transport_hub: bool,
}

impl StopLocation {
    /// Parsed `(lat, lon)`. Unparseable or zero coordinates yield `None`.
    pub fn position(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.trim().parse::<f64>().ok()?;
        let lon = self.longitude.trim().parse::<f64>().ok()?;
        valid_position(lat, lon)
    }
}

/// One geometric variant (direction) of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteVariant {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub variant_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(deserialize_with = "null_as_default")]
    pub variant: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub operator: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bus_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub direction_type_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub flow_coordinates: Vec<FlowCoordinate>,
}

/// A point along a rendered route path. Not a passenger stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowCoordinate {
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lon: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub sequence: i64,
}

impl FlowCoordinate {
    pub fn position(&self) -> Option<(f64, f64)> {
        valid_position(self.lat, self.lon)
    }
}

fn valid_position(lat: f64, lon: f64) -> Option<(f64, f64)> {
    if lat.is_nan() || lon.is_nan() || lat == 0.0 || lon == 0.0 {
        None
    } else {
        Some((lat, lon))
    }
}
