//! Position fixes from an IP-geolocation service or a local location server
//!
//! Both sources answer a plain GET with a JSON object carrying numeric `lat`
//! and `lon` fields. Only those two values feed the projection; the rest is
//! kept for logging.

use super::USER_AGENT;
use crate::WeatherGridError;
use crate::config::GeolocationConfig;
use crate::models::GeoCoordinate;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Geolocation payload; ip-api.com and the local server share `lat`/`lon`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationResponse {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// "success"/"fail" from ip-api.com, free text from the local server
    pub status: Option<String>,
    /// Failure reason reported by ip-api.com
    pub message: Option<String>,
    pub source: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub isp: Option<String>,
}

impl GeolocationResponse {
    pub fn parse(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| WeatherGridError::parse(format!("Invalid geolocation JSON: {e}")))
    }

    /// The reported fix, or an error carrying the service's reason
    pub fn coordinate(&self) -> crate::Result<GeoCoordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(GeoCoordinate::new(lat, lon)),
            _ => {
                let reason = self
                    .message
                    .as_deref()
                    .or(self.status.as_deref())
                    .unwrap_or("no coordinates in response");
                Err(WeatherGridError::api(format!(
                    "Geolocation service returned no fix: {reason}"
                )))
            }
        }
    }
}

/// Blocking client for the configured geolocation endpoint
pub struct GeolocationClient {
    client: Client,
    url: String,
}

impl GeolocationClient {
    pub fn new(config: &GeolocationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Request a single position fix
    #[instrument(skip(self), fields(url = %self.url))]
    pub fn fetch(&self) -> Result<(GeoCoordinate, GeolocationResponse)> {
        let start_time = Instant::now();

        let body = self
            .client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| WeatherGridError::api(format!("Geolocation request failed: {e}")))?
            .text()
            .with_context(|| "Failed to read geolocation response")?;

        let response = GeolocationResponse::parse(&body)?;
        let coordinate = response.coordinate()?;

        info!(
            "Position fix {} in {:.3}s",
            coordinate.format_coordinates(),
            start_time.elapsed().as_secs_f64()
        );
        debug!(
            "Geolocation details: city={:?} country={:?} isp={:?} source={:?} status={:?}",
            response.city, response.country, response.isp, response.source, response.status
        );

        Ok((coordinate, response))
    }
}
