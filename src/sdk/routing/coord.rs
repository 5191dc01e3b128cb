use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::sdk::error::TravelTimeError;

/// A point on the map, latitude first.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Swaps the two halves of a coordinate pair. ORS speaks `[lon, lat]`,
/// everything on our side is `[lat, lon]`.
pub fn swap(pair: [f64; 2]) -> [f64; 2] {
    [pair[1], pair[0]]
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, TravelTimeError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(TravelTimeError::invalid(format!(
                "latitude {} is outside [-90, 90]",
                lat
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(TravelTimeError::invalid(format!(
                "longitude {} is outside [-180, 180]",
                lon
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Builds a coordinate from a provider `[lon, lat]` pair.
    pub fn from_lon_lat(pair: [f64; 2]) -> Result<Self, TravelTimeError> {
        let [lat, lon] = swap(pair);
        Self::new(lat, lon)
    }

    pub fn to_lon_lat(self) -> [f64; 2] {
        swap([self.lat, self.lon])
    }

    /// The `lon,lat` string the directions endpoint expects for `start`/`end`.
    pub fn to_query_param(self) -> String {
        format!("{},{}", self.lon, self.lat)
    }

    pub fn midpoint(self, other: Coordinate) -> Coordinate {
        Coordinate {
            lat: (self.lat + other.lat) / 2.0,
            lon: (self.lon + other.lon) / 2.0,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Parses `lat,lon`.
impl FromStr for Coordinate {
    type Err = TravelTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(TravelTimeError::invalid(format!(
                "expected `lat,lon`, got \"{}\"",
                s
            )));
        }
        let parse = |part: &str| {
            part.parse::<f64>().map_err(|e| {
                TravelTimeError::invalid(format!("bad coordinate component \"{}\": {}", part, e))
            })
        };
        Coordinate::new(parse(parts[0])?, parse(parts[1])?)
    }
}
