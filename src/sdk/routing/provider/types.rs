use serde::Deserialize;

// --- Data Structures for parsing the GeoJSON flavour of ORS directions ---

#[derive(Deserialize, Debug)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}
#[derive(Deserialize, Debug)]
pub struct RouteFeature {
    pub properties: RouteProperties,
    pub geometry: LineGeometry,
}
#[derive(Deserialize, Debug)]
pub struct RouteProperties {
    pub summary: DirectionsSummary,
}
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct DirectionsSummary {
    pub distance: f64,
    pub duration: f64,
}
#[derive(Deserialize, Debug)]
pub struct LineGeometry {
    /// `[lon, lat]` pairs. ORS may append elevation, which we ignore.
    pub coordinates: Vec<Vec<f64>>,
}
