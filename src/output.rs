//! Output formatting and persistence for reports and route tables.
//!
//! Supports pretty-printing, JSON files, and CSV files (optionally gzipped).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::utility::format_duration;
use crate::metrics::ProcessedRoute;

/// Flat CSV row for one processed route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRow {
    pub id: i64,
    pub number: String,
    pub carrier: String,
    pub first_point: String,
    pub last_point: String,
    pub region: String,
    pub payment_type: String,
    pub working_zone: String,
    pub route_length_km: f64,
    pub duration_minutes: f64,
    /// `duration_minutes` as `"1h 5m"`.
    pub duration: String,
    pub avg_speed_kmh: f64,
    pub stop_count: usize,
    pub stop_density: f64,
    pub avg_distance_between_stops_km: f64,
    pub transport_hubs: usize,
    pub tariff: f64,
}

impl From<&ProcessedRoute> for RouteRow {
    fn from(p: &ProcessedRoute) -> Self {
        let r = &p.route;
        RouteRow {
            id: r.id,
            number: r.number.clone(),
            carrier: r.carrier.clone(),
            first_point: r.first_point.clone(),
            last_point: r.last_point.clone(),
            region: r.region_name().unwrap_or_default().to_string(),
            payment_type: r.payment_type_name().unwrap_or_default().to_string(),
            working_zone: r.working_zone_name().unwrap_or_default().to_string(),
            route_length_km: p.length(),
            duration_minutes: p.duration_minutes(),
            duration: format_duration(p.duration_minutes()),
            avg_speed_kmh: p.avg_speed,
            stop_count: p.stop_count,
            stop_density: p.stop_density,
            avg_distance_between_stops_km: p.avg_distance_between_stops,
            transport_hubs: p.transport_hub_count,
            tariff: p.tariff_major_units,
        }
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty-printed JSON, replacing any existing file.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    info!(path, "JSON written");
    Ok(())
}

/// Appends rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = rows.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Serializes rows to CSV in memory, header included.
pub fn to_csv_bytes<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Writes rows to a gzip-compressed CSV file, replacing any existing file.
pub fn write_gzip_records<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let csv = to_csv_bytes(rows)?;

    let mut encoder = GzEncoder::new(File::create(path)?, Compression::default());
    encoder.write_all(&csv)?;
    encoder.finish()?;

    info!(path, rows = rows.len(), "Gzipped CSV written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::GroupStats;
    use crate::metrics::enrich;
    use crate::model::RouteRecord;
    use flate2::read::GzDecoder;
    use std::env;
    use std::fs;
    use std::io::Read;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn group(name: &str) -> GroupStats {
        GroupStats {
            name: name.to_string(),
            route_count: 1,
            total_distance: 10.0,
            avg_speed: 30.0,
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&group("A"));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&group("A")).unwrap();
    }

    #[test]
    fn test_append_records_writes_header_once() {
        let path = temp_path("route_insights_test_header.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_records(&path, &[group("A")]).unwrap();
        append_records(&path, &[group("B"), group("C")]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "name,route_count,total_distance,avg_speed");
        assert_eq!(content.lines().filter(|l| l.starts_with("name,")).count(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_route_row_from_processed() {
        let routes = enrich(vec![RouteRecord {
            id: 4,
            number: "5A".to_string(),
            route_length: Some(12.0),
            duration_minutes: Some(24.0),
            tariff: Some(50.0),
            ..Default::default()
        }]);

        let row = RouteRow::from(&routes[0]);
        assert_eq!(row.number, "5A");
        assert_eq!(row.avg_speed_kmh, 30.0);
        assert_eq!(row.duration, "24m");
        assert_eq!(row.tariff, 0.5);
        assert_eq!(row.region, "");
    }

    #[test]
    fn test_gzip_round_trip() {
        let path = temp_path("route_insights_test.csv.gz");
        let _ = fs::remove_file(&path);

        write_gzip_records(&path, &[group("A")]).unwrap();

        let mut decoded = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert!(decoded.starts_with("name,route_count"));
        assert!(decoded.contains("A,1,10.0,30.0"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json() {
        let path = temp_path("route_insights_test.json");
        write_json(&path, &vec![group("A")]).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["name"], "A");

        fs::remove_file(&path).unwrap();
    }
}
