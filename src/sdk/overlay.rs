use serde::Serialize;

use super::error::TravelTimeError;
use super::routing::Coordinate;
use super::trip::{TripEstimate, TripRequest};

pub const DEFAULT_ZOOM: u8 = 13;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub location: Coordinate,
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<Coordinate>,
    pub weight: u8,
    pub color: &'static str,
    pub opacity: f64,
    pub tooltip: String,
}

/// Everything a map widget needs to draw one computed trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOverlay {
    pub center: Coordinate,
    pub zoom: u8,
    pub route: Polyline,
    pub markers: Vec<Marker>,
}

pub fn tooltip(estimate: &TripEstimate) -> String {
    format!(
        "Model predicted time = {} mins, Default travel time = {} mins",
        estimate.predicted_minutes, estimate.provider_minutes
    )
}

impl RouteOverlay {
    pub fn new(request: &TripRequest, estimate: &TripEstimate) -> Self {
        Self {
            center: request.source.midpoint(request.destination),
            zoom: DEFAULT_ZOOM,
            route: Polyline {
                points: estimate.path.clone(),
                weight: 8,
                color: "blue",
                opacity: 0.6,
                tooltip: tooltip(estimate),
            },
            markers: vec![
                Marker {
                    location: request.source,
                    icon: "play",
                    color: "green",
                },
                Marker {
                    location: request.destination,
                    icon: "stop",
                    color: "red",
                },
            ],
        }
    }
}

/// Driving directions deep link for an external maps app.
pub fn google_maps_url(
    source: Coordinate,
    destination: Coordinate,
) -> Result<String, TravelTimeError> {
    if source == destination {
        return Err(TravelTimeError::invalid(
            "please choose different source and destination",
        ));
    }
    Ok(format!(
        "https://www.google.com/maps/dir/{},{}/{},{}",
        source.lat, source.lon, destination.lat, destination.lon
    ))
}
