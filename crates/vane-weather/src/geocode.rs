//! Forward geocoding: resolve a city name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::error::LookupError;
use crate::types::Coordinates;

const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new() -> Result<Self, LookupError> {
        Self::new_with_base_url(GEOCODING_API_BASE)
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

    /// Resolve a city name to coordinates, taking the first candidate.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve(&self, city: &str) -> Result<Coordinates, LookupError> {
        let url = format!(
            "{}/v1/search?name={}&count=1",
            self.base_url,
            urlencoding::encode(city),
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LookupError::Api(format!(
                "geocoding returned {}: {}",
                status, text
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Api(format!("geocoding parse error: {}", e)))?;

        let first = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(city.to_string()))?;

        tracing::info!(
            "resolved {} to ({}, {})",
            city,
            first.latitude,
            first.longitude
        );

        Ok(Coordinates {
            latitude: first.latitude,
            longitude: first.longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_resolve_takes_first_candidate() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Москва"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"name": "Moscow", "latitude": 55.7558, "longitude": 37.6173},
                    {"name": "Moscow, ID", "latitude": 46.7324, "longitude": -117.0002}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodingClient::new_with_base_url(&mock_server.uri()).unwrap();
        let coords = client.resolve("Москва").await.unwrap();

        assert_eq!(coords.latitude, 55.7558);
        assert_eq!(coords.longitude, 37.6173);
    }

    #[tokio::test]
    async fn test_resolve_empty_results_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})),
            )
            .mount(&mock_server)
            .await;

        let client = GeocodingClient::new_with_base_url(&mock_server.uri()).unwrap();
        let err = client.resolve("Нигденет").await.unwrap_err();

        assert!(matches!(err, LookupError::NotFound(city) if city == "Нигденет"));
    }

    #[tokio::test]
    async fn test_resolve_missing_results_field_is_not_found() {
        let mock_server = MockServer::start().await;

        // The real API omits "results" entirely when nothing matches.
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"generationtime_ms": 0.5})),
            )
            .mount(&mock_server)
            .await;

        let client = GeocodingClient::new_with_base_url(&mock_server.uri()).unwrap();
        let err = client.resolve("nowhere").await.unwrap_err();

        assert!(matches!(err, LookupError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_server_error_is_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let client = GeocodingClient::new_with_base_url(&mock_server.uri()).unwrap();
        let err = client.resolve("Moscow").await.unwrap_err();

        match err {
            LookupError::Api(msg) => {
                assert!(msg.contains("503"), "message should carry status: {}", msg);
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resolve_unparseable_body_is_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = GeocodingClient::new_with_base_url(&mock_server.uri()).unwrap();
        let err = client.resolve("Moscow").await.unwrap_err();

        assert!(matches!(err, LookupError::Api(_)));
    }
}
