//! Report configuration.
//!
//! Stored as a JSON object on disk. Every key is optional:
//! ```json
//! {
//!   "insights": { "fast_speed": 37.0, "slow_speed": 36.5 },
//!   "top_limit": 15,
//!   "page_size": 10
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable naming the config file when `--config` is not given.
pub const CONFIG_ENV: &str = "ROUTE_INSIGHTS_CONFIG";

/// Thresholds used to classify routes in [`crate::analyzers::Insights`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Routes at or above this speed (km/h) are fast.
    pub fast_speed: f64,
    /// Routes below this speed (km/h) are slow.
    pub slow_speed: f64,
    /// Routes longer than this (km) are long-distance.
    pub long_route_km: f64,
    /// Routes with more stops per km than this are high-density.
    pub high_density: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            fast_speed: 37.0,
            slow_speed: 36.5,
            long_route_km: 40.0,
            high_density: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub insights: InsightConfig,
    /// Default length of top/bottom rankings.
    pub top_limit: usize,
    /// Rows per page of the route table.
    pub page_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            insights: InsightConfig::default(),
            top_limit: 10,
            page_size: 10,
        }
    }
}

impl ReportConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path))?;
        Ok(config)
    }

    /// Loads from `path`, else from the file named by [`CONFIG_ENV`], else
    /// returns defaults.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_ENV).ok();
        match path.or(from_env.as_deref()) {
            Some(p) => {
                debug!(path = p, "Loading report config");
                Self::load(p)
            }
            None => Ok(Self::default()),
        }
    }
}
