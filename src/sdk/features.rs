//! Turns a trip into the row of numbers the regression model was trained on.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;

use super::error::TravelTimeError;
use super::routing::Coordinate;

/// Coarse time-of-day bucket, numbered 1 to 5 as the model expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimePeriod {
    Night = 1,
    MorningPeak = 2,
    Midday = 3,
    EveningPeak = 4,
    Evening = 5,
}

/// Inclusive hour ranges per bucket. Together they cover 0..=23 exactly once.
pub const TIME_PERIODS: [(TimePeriod, u32, u32); 5] = [
    (TimePeriod::Night, 0, 6),
    (TimePeriod::MorningPeak, 7, 9),
    (TimePeriod::Midday, 10, 15),
    (TimePeriod::EveningPeak, 16, 18),
    (TimePeriod::Evening, 19, 23),
];

impl TimePeriod {
    pub fn from_hour(hour: u32) -> Result<Self, TravelTimeError> {
        TIME_PERIODS
            .iter()
            .find(|(_, start, end)| (*start..=*end).contains(&hour))
            .map(|(period, _, _)| *period)
            .ok_or_else(|| TravelTimeError::invalid(format!("hour {} is outside 0..=23", hour)))
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Bucket number (1-5) for a departure hour.
pub fn time_period(hour: u32) -> Result<u8, TravelTimeError> {
    TimePeriod::from_hour(hour).map(TimePeriod::ordinal)
}

/// The nine model inputs, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Day,
    TimePeriod,
    DayOfWeek,
    SourceLat,
    SourceLon,
    DestinationLat,
    DestinationLon,
    Distance,
    Holiday,
}

impl Feature {
    pub const ALL: [Feature; 9] = [
        Feature::Day,
        Feature::TimePeriod,
        Feature::DayOfWeek,
        Feature::SourceLat,
        Feature::SourceLon,
        Feature::DestinationLat,
        Feature::DestinationLon,
        Feature::Distance,
        Feature::Holiday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Day => "day",
            Feature::TimePeriod => "time_period",
            Feature::DayOfWeek => "day_of_week",
            Feature::SourceLat => "source_lat",
            Feature::SourceLon => "source_lon",
            Feature::DestinationLat => "destination_lat",
            Feature::DestinationLon => "destination_lon",
            Feature::Distance => "distance",
            Feature::Holiday => "holiday",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Feature::ALL.into_iter().find(|f| f.name() == name.trim())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Model inputs for one trip, kept by name until laid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub day: u32,
    pub time_period: u8,
    /// Monday = 0.
    pub day_of_week: u32,
    pub source: Coordinate,
    pub destination: Coordinate,
    pub distance_meters: f64,
    pub holiday: bool,
}

impl FeatureVector {
    pub fn assemble(
        date: NaiveDate,
        departure_time: NaiveTime,
        source: Coordinate,
        destination: Coordinate,
        distance_meters: f64,
        holiday: bool,
    ) -> Result<Self, TravelTimeError> {
        Ok(Self {
            day: date.day(),
            time_period: time_period(departure_time.hour())?,
            day_of_week: date.weekday().num_days_from_monday(),
            source,
            destination,
            distance_meters,
            holiday,
        })
    }

    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Day => f64::from(self.day),
            Feature::TimePeriod => f64::from(self.time_period),
            Feature::DayOfWeek => f64::from(self.day_of_week),
            Feature::SourceLat => self.source.lat,
            Feature::SourceLon => self.source.lon,
            Feature::DestinationLat => self.destination.lat,
            Feature::DestinationLon => self.destination.lon,
            Feature::Distance => self.distance_meters,
            Feature::Holiday => {
                if self.holiday {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Column order of the model's input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLayout {
    columns: [Feature; 9],
}

impl Default for FeatureLayout {
    /// Order the bundled city models were trained with: longitude before latitude.
    fn default() -> Self {
        Self {
            columns: [
                Feature::Day,
                Feature::TimePeriod,
                Feature::DayOfWeek,
                Feature::SourceLon,
                Feature::SourceLat,
                Feature::DestinationLon,
                Feature::DestinationLat,
                Feature::Distance,
                Feature::Holiday,
            ],
        }
    }
}

impl FeatureLayout {
    /// Builds a layout from column names. Each feature must appear exactly once.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, String> {
        if names.len() != Feature::ALL.len() {
            return Err(format!(
                "expected {} feature names, got {}",
                Feature::ALL.len(),
                names.len()
            ));
        }
        let mut columns = [Feature::Day; 9];
        for (slot, name) in columns.iter_mut().zip(names) {
            let name = name.as_ref();
            *slot = Feature::from_name(name).ok_or_else(|| format!("unknown feature \"{}\"", name))?;
        }
        for (i, feature) in columns.iter().enumerate() {
            if columns[..i].contains(feature) {
                return Err(format!("feature \"{}\" listed twice", feature));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Feature; 9] {
        &self.columns
    }

    pub fn row(&self, features: &FeatureVector) -> [f64; 9] {
        self.columns.map(|column| features.value(column))
    }
}
