//! KMA API hub client for ultra-short-range nowcast observations
//!
//! Each hour is requested once. A failed hour is logged and left empty in
//! the history; the caller decides what to show.

use super::USER_AGENT;
use crate::WeatherGridError;
use crate::config::WeatherGridConfig;
use crate::models::GridCell;
use crate::weather::{
    BaseTime, Observation, WeatherHistory, extract_observation, history_base_times,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{Level, debug, info, instrument, span, warn};

const NOWCAST_PATH: &str = "/api/typ02/openApi/VilageFcstInfoService_2.0/getUltraSrtNcst";

/// Build the `getUltraSrtNcst` request URL for a cell and hour
#[must_use]
pub fn nowcast_url(base_url: &str, auth_key: &str, cell: GridCell, base: BaseTime) -> String {
    format!(
        "{}{}?authKey={}&dataType=JSON&numOfRows=60&pageNo=1&base_date={}&base_time={}&nx={}&ny={}",
        base_url.trim_end_matches('/'),
        NOWCAST_PATH,
        urlencoding::encode(auth_key),
        base.date_param(),
        base.time_param(),
        cell.x,
        cell.y
    )
}

/// Weather API client for the KMA API hub
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    auth_key: String,
}

impl WeatherApiClient {
    /// Create a client; fails when no auth key is configured
    pub fn new(config: &WeatherGridConfig) -> Result<Self> {
        let auth_key = config.require_auth_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.kma.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.kma.base_url.clone(),
            auth_key,
        })
    }

    /// Fetch the observation for one cell and hour
    #[instrument(skip(self), fields(nx = cell.x, ny = cell.y, base_time = %base.time_param()))]
    pub fn fetch_observation(&self, cell: GridCell, base: BaseTime) -> Result<Option<Observation>> {
        let url = nowcast_url(&self.base_url, &self.auth_key, cell, base);
        debug!(
            "Requesting nowcast for {} at {} {}",
            cell,
            base.date_param(),
            base.time_param()
        );

        let start_time = Instant::now();
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| WeatherGridError::api(format!("Nowcast request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherGridError::api(format!(
                "Nowcast request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            ))
            .into());
        }

        let body = response
            .text()
            .with_context(|| "Failed to read nowcast response")?;
        let observation = extract_observation(&body)?;

        debug!(
            "Nowcast response in {:.3}s: {:?}",
            start_time.elapsed().as_secs_f64(),
            observation
        );

        Ok(observation)
    }

    /// Observation for the latest published hour
    pub fn current(&self, cell: GridCell, now: DateTime<Utc>) -> Result<Option<Observation>> {
        self.fetch_observation(cell, BaseTime::at(now))
    }

    /// Fill a 12-hour history for `cell`, newest hour first
    pub fn history(&self, cell: GridCell, now: DateTime<Utc>) -> WeatherHistory {
        let span = span!(Level::INFO, "history", nx = cell.x, ny = cell.y);
        let _enter = span.enter();

        let mut history = WeatherHistory::new();
        let base_times = history_base_times(now);

        // The current hour drives the main display, so it goes first.
        for (slot, base) in base_times.iter().enumerate().rev() {
            match self.fetch_observation(cell, *base) {
                Ok(Some(observation)) => history.record(slot, observation),
                Ok(None) => warn!("No observation for {} at {}", cell, base.time_param()),
                Err(e) => warn!("Nowcast for {} at {} failed: {:#}", cell, base.time_param(), e),
            }
        }

        info!(
            "Collected {}/{} hourly observations for {}",
            history.filled(),
            base_times.len(),
            cell
        );

        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_nowcast_url() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 5, 10, 0).unwrap();
        let url = nowcast_url(
            "https://apihub.kma.go.kr/",
            "key+/=",
            GridCell::new(60, 127),
            BaseTime::at(now),
        );

        assert_eq!(
            url,
            "https://apihub.kma.go.kr/api/typ02/openApi/VilageFcstInfoService_2.0/getUltraSrtNcst\
             ?authKey=key%2B%2F%3D&dataType=JSON&numOfRows=60&pageNo=1\
             &base_date=20261017&base_time=1400&nx=60&ny=127"
        );
    }

    #[test]
    fn test_client_requires_auth_key() {
        let config = WeatherGridConfig::default();
        let err = WeatherApiClient::new(&config).err().unwrap();
        assert!(err.to_string().contains("kma.auth_key"));
    }

    #[test]
    fn test_client_with_auth_key() {
        let mut config = WeatherGridConfig::default();
        config.kma.auth_key = Some("test-auth-key".to_string());
        let client = WeatherApiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://apihub.kma.go.kr");
    }
}
