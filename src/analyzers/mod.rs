//! Aggregation over processed routes.
//!
//! Fleet-wide KPIs, per-group rollups, rankings, bucket distributions,
//! performance quadrants and threshold-based insight counts. Every function
//! here is pure and accepts either owned routes or borrowed filter results.

pub mod aggregate;
pub mod distribution;
pub mod insights;
pub mod performance;
pub mod ranking;
pub mod types;
pub mod utility;

pub use aggregate::{carrier_stats, group_stats, summarize, unique_values, value_counts};
pub use distribution::{length_distribution, speed_distribution};
pub use insights::Insights;
pub use performance::{
    PerformanceMatrix, Quadrant, QuadrantCount, duration_trend, median_stop_density,
    performance_matrix,
};
pub use ranking::{bottom_by_field, top_by_field};
pub use types::{Bucket, GroupStats, KpiDisplay, KpiSummary, RouteExtreme, ValueCount};
