use std::path::Path;

use super::city::CityProfile;
use super::config::ServiceConfig;
use super::error::TravelTimeError;
use super::features::FeatureVector;
use super::model::{load_model, LoadedModel};
use super::routing::{OrsProvider, RoutingProvider};
use super::trip::{round_minutes, TripEstimate, TripRequest};

/// Routes a trip with the provider and asks the model how long it will really take.
///
/// Both fields are fixed at construction, so one service can be shared across
/// threads without locking.
pub struct TravelTimeService<P: RoutingProvider> {
    provider: P,
    model: LoadedModel,
}

impl<P: RoutingProvider> TravelTimeService<P> {
    pub fn new(provider: P, model: LoadedModel) -> Self {
        Self { provider, model }
    }

    pub fn model(&self) -> &LoadedModel {
        &self.model
    }

    pub fn estimate(&self, request: &TripRequest) -> Result<TripEstimate, TravelTimeError> {
        // TripRequest fields are public, so `TripRequest::new` may have been bypassed.
        if request.source == request.destination {
            return Err(TravelTimeError::invalid(
                "please choose different source and destination",
            ));
        }

        let route = self
            .provider
            .get_directions(request.source, request.destination)?;
        log::debug!(
            "Provider route: {:.0} m, {:.0} s, {} points",
            route.distance_meters,
            route.duration_seconds,
            route.path.len()
        );

        let features = FeatureVector::assemble(
            request.date,
            request.departure_time,
            request.source,
            request.destination,
            route.distance_meters,
            request.is_holiday,
        )?;
        let row = self.model.layout.row(&features);
        let predicted_seconds = self.model.regressor.predict(&row)?;

        let estimate = TripEstimate {
            predicted_minutes: round_minutes(predicted_seconds),
            provider_minutes: round_minutes(route.duration_seconds),
            predicted_seconds,
            provider_seconds: route.duration_seconds,
            distance_meters: route.distance_meters,
            path: route.path,
            features,
        };
        log::info!(
            "{} -> {}: model {} min, provider {} min",
            request.source,
            request.destination,
            estimate.predicted_minutes,
            estimate.provider_minutes
        );
        Ok(estimate)
    }
}

impl TravelTimeService<OrsProvider> {
    /// Wires the ORS provider and the city's model (or `model_override`) together.
    pub fn for_city(
        config: &ServiceConfig,
        profile: &CityProfile,
        model_override: Option<&Path>,
    ) -> Result<Self, TravelTimeError> {
        let provider = OrsProvider::from_config(config)?;
        let model_path = match model_override {
            Some(path) => path.to_path_buf(),
            None => profile.model_path(&config.model_dir),
        };
        let model = load_model(&model_path)?;
        Ok(Self::new(provider, model))
    }
}
