//! Dashboard report: every panel computed for the full network and the
//! current filtered view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::{
    Bucket, GroupStats, Insights, KpiDisplay, KpiSummary, PerformanceMatrix, bottom_by_field,
    carrier_stats, duration_trend, length_distribution, median_stop_density, performance_matrix,
    speed_distribution, summarize, top_by_field,
};
use crate::bounds::{map_center, network_bounds};
use crate::config::ReportConfig;
use crate::fields::RouteField;
use crate::filters::FilterCriteria;
use crate::metrics::ProcessedRoute;
use crate::state::DashboardState;

/// Route reference used in rankings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRoute {
    pub id: i64,
    pub number: String,
    pub carrier: String,
    pub value: f64,
}

impl RankedRoute {
    fn list(routes: Vec<&ProcessedRoute>, field: RouteField) -> Vec<Self> {
        routes
            .into_iter()
            .map(|r| RankedRoute {
                id: r.route.id,
                number: r.route.number.clone(),
                carrier: r.route.carrier.clone(),
                value: field.numeric_value(r).unwrap_or(0.0),
            })
            .collect()
    }
}

/// `[min_lon, min_lat, max_lon, max_lat]` plus the center as `(lat, lon)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFrame {
    pub bbox: Option<[f64; 4]>,
    pub center: (f64, f64),
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub filters: FilterCriteria,
    pub network: Option<KpiSummary>,
    pub view: Option<KpiSummary>,
    pub view_display: Option<KpiDisplay>,
    pub insights: Insights,
    pub speed_distribution: Vec<Bucket>,
    pub length_distribution: Vec<Bucket>,
    pub performance: Option<PerformanceMatrix>,
    /// Minutes per kilometre.
    pub duration_trend: Option<f64>,
    pub median_stop_density: Option<f64>,
    pub top_carriers: Vec<GroupStats>,
    pub fastest: Vec<RankedRoute>,
    pub slowest: Vec<RankedRoute>,
    pub most_hubs: Vec<RankedRoute>,
    pub map: MapFrame,
}

impl Report {
    pub fn build(state: &DashboardState, config: &ReportConfig) -> Self {
        let all = state.routes();
        let view = state.filtered_routes();
        let limit = config.top_limit;

        let view_summary = summarize(&view);
        let bounds = network_bounds(&state.display_routes());

        let mut top_carriers = carrier_stats(&view);
        top_carriers.truncate(limit);

        Report {
            generated_at: Utc::now(),
            filters: state.filters().clone(),
            network: summarize(all),
            view_display: view_summary.as_ref().map(KpiSummary::display),
            view: view_summary,
            insights: Insights::from_routes(&view, all, &config.insights),
            speed_distribution: speed_distribution(&view),
            length_distribution: length_distribution(&view),
            performance: performance_matrix(&view),
            duration_trend: duration_trend(&view),
            median_stop_density: median_stop_density(&view),
            top_carriers,
            fastest: RankedRoute::list(
                top_by_field(&view, RouteField::AvgSpeed, limit),
                RouteField::AvgSpeed,
            ),
            slowest: RankedRoute::list(
                bottom_by_field(&view, RouteField::AvgSpeed, limit),
                RouteField::AvgSpeed,
            ),
            most_hubs: RankedRoute::list(
                top_by_field(&view, RouteField::TransportHubCount, limit),
                RouteField::TransportHubCount,
            ),
            map: MapFrame {
                bbox: bounds.map(|b| [b.min().x, b.min().y, b.max().x, b.max().y]),
                center: map_center(bounds.as_ref()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RouteRecord;

    fn raw() -> Vec<RouteRecord> {
        // speeds 30, 60, 15; last record has no duration
        [("A", 10.0, Some(20.0)), ("B", 20.0, Some(20.0)), ("A", 5.0, Some(20.0)), ("C", 9.0, None)]
            .into_iter()
            .enumerate()
            .map(|(i, (carrier, length, duration))| RouteRecord {
                id: i as i64,
                number: format!("{}", i + 1),
                carrier: carrier.to_string(),
                route_length: Some(length),
                duration_minutes: duration,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_report_over_filtered_view() {
        let state = DashboardState::load(raw()).with_filters(FilterCriteria::new().carriers(["A"]));
        let config = ReportConfig {
            top_limit: 1,
            ..Default::default()
        };

        let report = Report::build(&state, &config);

        assert_eq!(report.network.as_ref().unwrap().total_routes, 3);
        assert_eq!(report.view.as_ref().unwrap().total_routes, 2);
        assert_eq!(report.view_display.as_ref().unwrap().avg_speed, "22.5");
        assert_eq!(report.insights.total_routes, 3);
        assert_eq!(report.top_carriers.len(), 1);
        assert_eq!(report.fastest[0].number, "1");
        assert_eq!(report.slowest[0].number, "3");
        assert!(report.map.bbox.is_none());

        let performance = report.performance.as_ref().unwrap();
        assert_eq!(performance.median_speed, 22.5);
        // lengths 10 and 5 over the same 20 minutes
        assert_eq!(report.duration_trend, Some(0.0));
        assert_eq!(report.median_stop_density, Some(0.0));
    }

    #[test]
    fn test_report_of_empty_view() {
        let state = DashboardState::load(raw()).with_filters(FilterCriteria::new().carriers(["Z"]));
        let report = Report::build(&state, &ReportConfig::default());

        assert!(report.view.is_none());
        assert!(report.view_display.is_none());
        assert!(report.fastest.is_empty());
        assert!(report.performance.is_none());
        assert!(report.duration_trend.is_none());
        assert_eq!(report.insights.displayed_routes, 0);
    }

    #[test]
    fn test_report_serializes() {
        let state = DashboardState::load(raw());
        let report = Report::build(&state, &ReportConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["network"]["carriers"], 2);
        assert_eq!(json["network"]["fastest"]["number"], "2");
        assert_eq!(json["performance"]["quadrants"][0]["quadrant"], "high-coverage");
    }
}
