pub mod sdk;

pub use sdk::city::{City, CityProfile, PointCatalog};
pub use sdk::config::{OrsConfig, ServiceConfig};
pub use sdk::error::TravelTimeError;
pub use sdk::features::{time_period, FeatureLayout, FeatureVector, TimePeriod};
pub use sdk::model::{load_model, LoadedModel, Regressor};
pub use sdk::overlay::{google_maps_url, RouteOverlay};
pub use sdk::predictor::TravelTimeService;
pub use sdk::routing::{Coordinate, OrsProvider, RouteSummary, RoutingProvider};
pub use sdk::trip::{TripEstimate, TripRequest};
