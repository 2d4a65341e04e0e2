//! Current-conditions fetcher backed by the Open-Meteo forecast API.

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::error::LookupError;
use crate::types::{Coordinates, WeatherRecord};

const FORECAST_API_BASE: &str = "https://api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeatherBody>,
}

// Missing fields default to zero rather than failing the whole response.
#[derive(Debug, Default, Deserialize)]
struct CurrentWeatherBody {
    #[serde(default)]
    temperature: f64,
    #[serde(default)]
    windspeed: f64,
    #[serde(default)]
    winddirection: f64,
    #[serde(default)]
    weathercode: i32,
    #[serde(default)]
    time: String,
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new() -> Result<Self, LookupError> {
        Self::new_with_base_url(FORECAST_API_BASE)
    }

    pub fn new_with_base_url(base_url: &str) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current conditions for a point. No forecast horizon beyond "now".
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(&self, coords: Coordinates) -> Result<WeatherRecord, LookupError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true&windspeed_unit=ms&timezone=auto",
            self.base_url, coords.latitude, coords.longitude,
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LookupError::Api(format!(
                "forecast returned {}: {}",
                status, text
            )));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Api(format!("forecast parse error: {}", e)))?;

        let current = body.current_weather.unwrap_or_default();

        Ok(WeatherRecord {
            temperature_c: current.temperature,
            wind_speed_ms: current.windspeed,
            wind_direction_deg: current.winddirection,
            weather_code: current.weathercode,
            observed_at: parse_observation_time(&current.time),
        })
    }
}

/// The API reports observation time as local ISO without offset
/// ("2026-02-01T12:00"); RFC 3339 is accepted too. Unparseable or missing
/// times fall back to the epoch.
fn parse_observation_time(raw: &str) -> DateTime<Utc> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return naive.and_utc();
    }
    DateTime::<Utc>::UNIX_EPOCH
}
