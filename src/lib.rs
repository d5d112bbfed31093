pub mod analyzers;
pub mod bounds;
pub mod config;
pub mod fetch;
pub mod fields;
pub mod filters;
pub mod metrics;
pub mod model;
pub mod output;
pub mod parser;
pub mod report;
pub mod state;
pub mod table;

pub use fields::RouteField;
pub use filters::{FilterCriteria, apply_filters};
pub use metrics::{ProcessedRoute, enrich};
pub use model::RouteRecord;
pub use state::DashboardState;
