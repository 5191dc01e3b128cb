use serde::Serialize;

use super::coord::Coordinate;

/// What we keep from a single driving route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// Latitude-first, ready to draw.
    pub path: Vec<Coordinate>,
}
