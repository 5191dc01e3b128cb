use super::types::DirectionsResponse;
use crate::sdk::config::{ConfigError, OrsConfig, ServiceConfig};
use crate::sdk::routing::coord::Coordinate;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::route::RouteSummary;
use crate::sdk::routing::service::RoutingProvider;
use crate::sdk::util::rate_limit::{ors_limiter, wait_for_permit, Limiter};
use reqwest::blocking::Client;
use std::time::Duration;

/// Transient network failures get exactly one more try.
const MAX_ATTEMPTS: u32 = 2;

pub struct OrsProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    limiter: Limiter,
}

impl OrsProvider {
    pub fn new(config: &OrsConfig, timeout: Duration, limiter: Limiter) -> Result<Self, ConfigError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key: config.api_key().map(str::to_string),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            limiter,
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ConfigError> {
        Self::new(
            &config.ors,
            config.timeout,
            ors_limiter(config.rate_limit_per_minute),
        )
    }

    fn request_directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteSummary, RoutingError> {
        wait_for_permit(&self.limiter);
        let url = format!("{}/v2/directions/driving-car", self.base_url);

        let mut params = vec![
            ("start", start.to_query_param()),
            ("end", end.to_query_param()),
        ];
        if let Some(key) = &self.api_key {
            params.insert(0, ("api_key", key.clone()));
        }

        let response = match self.client.get(&url).query(&params).send() {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send GET request. URL: {}\nError: {}",
                    url,
                    e
                );
                return Err(RoutingError::RequestError(e));
            }
        };

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            log::error!(
                "API returned non-success status: {}. Body: {}",
                status,
                text
            );
            return Err(RoutingError::from_status(status.as_u16(), text));
        }

        parse_directions(&text).map_err(|e| {
            log::error!(
                "Failed to read DirectionsResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })
    }
}

/// Pulls distance, duration and the lat-first path out of the first route.
pub fn parse_directions(text: &str) -> Result<RouteSummary, RoutingError> {
    let response: DirectionsResponse = serde_json::from_str(text)?;

    let route = response
        .features
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::MalformedResponse("no route in success response".into()))?;

    let summary = route.properties.summary;
    if !summary.distance.is_finite() || summary.distance < 0.0 {
        return Err(RoutingError::MalformedResponse(format!(
            "invalid distance {}",
            summary.distance
        )));
    }
    if !summary.duration.is_finite() || summary.duration < 0.0 {
        return Err(RoutingError::MalformedResponse(format!(
            "invalid duration {}",
            summary.duration
        )));
    }

    let path = route
        .geometry
        .coordinates
        .iter()
        .map(|point| match point.as_slice() {
            [lon, lat, ..] => Coordinate::from_lon_lat([*lon, *lat])
                .map_err(|e| RoutingError::MalformedResponse(format!("route point: {}", e))),
            _ => Err(RoutingError::MalformedResponse(format!(
                "route point has {} components",
                point.len()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RouteSummary {
        distance_meters: summary.distance,
        duration_seconds: summary.duration,
        path,
    })
}

impl RoutingProvider for OrsProvider {
    fn get_directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteSummary, RoutingError> {
        log::debug!(
            "[PROVIDER] Calling get_directions for {} -> {}",
            start,
            end
        );

        let mut attempt = 1;
        loop {
            match self.request_directions(start, end) {
                Err(e) if e.is_transient() && attempt < MAX_ATTEMPTS => {
                    log::warn!(
                        "Transient routing failure (attempt {}/{}): {}. Retrying.",
                        attempt,
                        MAX_ATTEMPTS,
                        e
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
