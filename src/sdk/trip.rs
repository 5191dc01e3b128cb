use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::error::TravelTimeError;
use super::features::FeatureVector;
use super::routing::Coordinate;

/// One user submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripRequest {
    pub source: Coordinate,
    pub destination: Coordinate,
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub is_holiday: bool,
}

impl TripRequest {
    pub fn new(
        source: Coordinate,
        destination: Coordinate,
        date: NaiveDate,
        departure_time: NaiveTime,
        is_holiday: bool,
    ) -> Result<Self, TravelTimeError> {
        if source == destination {
            return Err(TravelTimeError::invalid(
                "please choose different source and destination",
            ));
        }
        Ok(Self {
            source,
            destination,
            date,
            departure_time,
            is_holiday,
        })
    }
}

/// Result of one prediction, ready to print or draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripEstimate {
    pub predicted_minutes: i64,
    pub provider_minutes: i64,
    pub predicted_seconds: f64,
    pub provider_seconds: f64,
    pub distance_meters: f64,
    pub path: Vec<Coordinate>,
    pub features: FeatureVector,
}

/// `YYYY-MM-DD`
pub fn parse_date(s: &str) -> Result<NaiveDate, TravelTimeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| TravelTimeError::invalid(format!("bad date \"{}\": {}", s, e)))
}

/// `HH:MM`, seconds optional.
pub fn parse_time(s: &str) -> Result<NaiveTime, TravelTimeError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| TravelTimeError::invalid(format!("bad time \"{}\": {}", s, e)))
}

/// Seconds to whole minutes, halves rounded to even.
pub fn round_minutes(seconds: f64) -> i64 {
    (seconds / 60.0).round_ties_even() as i64
}
