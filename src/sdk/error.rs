use thiserror::Error;

use super::config::ConfigError;
use super::model::ModelError;
use super::routing::RoutingError;

/// Everything a travel-time request can fail with.
#[derive(Error, Debug)]
pub enum TravelTimeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Routing provider unavailable: {0}")]
    UpstreamUnavailable(RoutingError),

    #[error("Malformed routing provider response: {0}")]
    MalformedUpstreamResponse(RoutingError),

    #[error("Prediction failed: {0}")]
    PredictionFailure(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<RoutingError> for TravelTimeError {
    fn from(err: RoutingError) -> Self {
        if err.is_unavailable() {
            TravelTimeError::UpstreamUnavailable(err)
        } else {
            TravelTimeError::MalformedUpstreamResponse(err)
        }
    }
}

impl TravelTimeError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        TravelTimeError::InvalidInput(msg.into())
    }
}
