use super::coord::Coordinate;
use super::error::RoutingError;
use super::route::RouteSummary;

pub trait RoutingProvider: Send + Sync {
    /// Gets a driving route between two points.
    fn get_directions(&self, start: Coordinate, end: Coordinate)
        -> Result<RouteSummary, RoutingError>;
}
