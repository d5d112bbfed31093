//! Immutable dashboard state.
//!
//! The caller keeps a single `DashboardState` and replaces it with the value
//! returned by each transition. Processed routes are shared between states
//! through an [`Arc`], so transitions never re-run enrichment.

use std::sync::Arc;

use tracing::debug;

use crate::filters::FilterCriteria;
use crate::metrics::{ProcessedRoute, enrich};
use crate::model::RouteRecord;

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    routes: Arc<[ProcessedRoute]>,
    filters: FilterCriteria,
    /// Indices into `routes` that pass `filters`, in order.
    filtered: Vec<usize>,
    selected: Option<usize>,
}

impl DashboardState {
    /// Enriches a freshly loaded dataset. Every route is shown initially.
    pub fn load(raw: Vec<RouteRecord>) -> Self {
        let routes: Arc<[ProcessedRoute]> = enrich(raw).into();
        let filtered = (0..routes.len()).collect();
        Self {
            routes,
            filters: FilterCriteria::default(),
            filtered,
            selected: None,
        }
    }

    pub fn with_filters(self, filters: FilterCriteria) -> Self {
        let filtered: Vec<usize> = self
            .routes
            .iter()
            .enumerate()
            .filter(|(_, r)| filters.matches(r))
            .map(|(i, _)| i)
            .collect();

        debug!(
            total = self.routes.len(),
            shown = filtered.len(),
            "Filters applied"
        );

        Self {
            filters,
            filtered,
            ..self
        }
    }

    /// Clears every criterion and shows the full route set again.
    pub fn reset_filters(self) -> Self {
        self.with_filters(FilterCriteria::default())
    }

    /// Selects the route with `route_id`. Unknown ids clear the selection.
    pub fn select(self, route_id: i64) -> Self {
        let selected = self.routes.iter().position(|r| r.route.id == route_id);
        Self { selected, ..self }
    }

    pub fn clear_selection(self) -> Self {
        Self {
            selected: None,
            ..self
        }
    }

    pub fn routes(&self) -> &[ProcessedRoute] {
        &self.routes
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn filtered_routes(&self) -> Vec<&ProcessedRoute> {
        self.filtered.iter().map(|&i| &self.routes[i]).collect()
    }

    pub fn selected_route(&self) -> Option<&ProcessedRoute> {
        self.selected.map(|i| &self.routes[i])
    }

    /// Routes to draw on the map: the selection alone, else the filtered set.
    pub fn display_routes(&self) -> Vec<&ProcessedRoute> {
        match self.selected_route() {
            Some(r) => vec![r],
            None => self.filtered_routes(),
        }
    }
}
