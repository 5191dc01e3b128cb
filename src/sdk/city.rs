use csv::ReaderBuilder;
use serde::Serialize;
use std::{fmt, fs::File, path::Path, path::PathBuf, str::FromStr};

use super::error::TravelTimeError;
use super::routing::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    Bangalore,
    Hyderabad,
}

impl City {
    pub const ALL: [City; 2] = [City::Bangalore, City::Hyderabad];

    pub fn name(self) -> &'static str {
        match self {
            City::Bangalore => "Bangalore",
            City::Hyderabad => "Hyderabad",
        }
    }

    /// File name of the city's model inside the model directory.
    pub fn model_file(self) -> &'static str {
        match self {
            City::Bangalore => "Est_time_pred.json",
            City::Hyderabad => "Est_time_pred_hyd.json",
        }
    }

    fn builtin_points(self) -> &'static [(f64, f64)] {
        match self {
            City::Bangalore => &[
                (12.946538, 77.579975),
                (13.04438892, 77.60185844),
                (12.95275348, 77.72982887),
            ],
            City::Hyderabad => &[
                (17.4990737222447, 78.5484425537565),
                (17.3228369187765, 78.4003341997112),
                (17.4289313805497, 78.3074137286198),
                (17.5338767879618, 78.4312953607305),
                (17.4501231060621, 78.3179062429442),
                (17.5237690238243, 78.5091847750287),
                (17.4894454531734, 78.4112496777986),
                (17.4308989846564, 78.5238677530526),
                (17.3011570696757, 78.4250332621834),
                (17.4819236326137, 78.5411551171801),
                (17.3227843624735, 78.4201698954023),
                (17.3858281961646, 78.4022854930672),
            ],
        }
    }

    pub fn profile(self) -> CityProfile {
        let points = self
            .builtin_points()
            .iter()
            .map(|&(lat, lon)| PickupPoint {
                coordinate: Coordinate { lat, lon },
                label: None,
            })
            .collect();
        CityProfile {
            city: self,
            model_file: self.model_file(),
            points: PointCatalog { points },
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = TravelTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TravelTimeError::invalid(format!("unknown city \"{}\"", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickupPoint {
    pub coordinate: Coordinate,
    pub label: Option<String>,
}

/// The fixed set of pickup/drop-off points offered for a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointCatalog {
    points: Vec<PickupPoint>,
}

impl PointCatalog {
    /// Loads a `lat,lon[,label]` CSV with a header row.
    pub fn from_csv<P: AsRef<Path>>(csv_path: P) -> Result<Self, TravelTimeError> {
        let path = csv_path.as_ref();
        let file = File::open(path).map_err(|e| {
            TravelTimeError::invalid(format!("cannot open points file {}: {}", path.display(), e))
        })?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .flexible(true)
            .from_reader(file);

        let mut points = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result
                .map_err(|e| TravelTimeError::invalid(format!("bad points CSV: {}", e)))?;
            let field = |idx: usize, what: &str| {
                record
                    .get(idx)
                    .map(str::trim)
                    .ok_or_else(|| {
                        TravelTimeError::invalid(format!("missing {} on row {}", what, line + 1))
                    })
            };
            let lat = field(0, "latitude")?;
            let lon = field(1, "longitude")?;
            let coordinate: Coordinate = format!("{},{}", lat, lon).parse()?;
            let label = record
                .get(2)
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string);
            points.push(PickupPoint { coordinate, label });
        }

        if points.is_empty() {
            return Err(TravelTimeError::invalid(format!(
                "points file {} has no rows",
                path.display()
            )));
        }
        log::debug!("Loaded {} points from {}", points.len(), path.display());
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PickupPoint] {
        &self.points
    }

    /// Looks up a point by its 1-based list number.
    pub fn get(&self, number: usize) -> Option<&PickupPoint> {
        number.checked_sub(1).and_then(|i| self.points.get(i))
    }

    /// Accepts either a list number (`2`) or a `lat,lon` literal from the list.
    pub fn resolve(&self, selector: &str) -> Result<Coordinate, TravelTimeError> {
        let selector = selector.trim();
        if let Ok(number) = selector.parse::<usize>() {
            return self.get(number).map(|p| p.coordinate).ok_or_else(|| {
                TravelTimeError::invalid(format!(
                    "point {} does not exist (choose 1-{})",
                    number,
                    self.points.len()
                ))
            });
        }
        let coordinate: Coordinate = selector.parse()?;
        if self.points.iter().any(|p| p.coordinate == coordinate) {
            Ok(coordinate)
        } else {
            Err(TravelTimeError::invalid(format!(
                "{} is not one of the listed points",
                coordinate
            )))
        }
    }
}

/// Everything that differs between cities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityProfile {
    pub city: City,
    pub model_file: &'static str,
    pub points: PointCatalog,
}

impl CityProfile {
    pub fn model_path(&self, model_dir: &Path) -> PathBuf {
        model_dir.join(self.model_file)
    }

    pub fn with_points(mut self, points: PointCatalog) -> Self {
        self.points = points;
        self
    }
}
