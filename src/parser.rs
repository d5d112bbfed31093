//! JSON parser for the bus network dataset.

use anyhow::Result;
use tracing::debug;

use crate::model::RouteRecord;

/// Decodes a JSON array of [`RouteRecord`]s.
///
/// # Errors
///
/// Returns an error if the bytes are not a JSON array of route objects.
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<RouteRecord>> {
    let routes: Vec<RouteRecord> = serde_json::from_slice(bytes)?;
    debug!(routes = routes.len(), "Dataset parsed");
    Ok(routes)
}
