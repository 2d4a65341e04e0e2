//! Lookup orchestration: cache check, resolve, fetch, store.

use chrono::Duration;

use crate::cache::WeatherCache;
use crate::error::LookupError;
use crate::geocode::GeocodingClient;
use crate::key::cache_key;
use crate::provider::ForecastClient;
use crate::types::{Coordinates, Lookup, LookupRequest, Origin};

/// Coordinates the cache and the two API clients for one lookup at a time.
pub struct LookupService {
    cache: WeatherCache,
    geocoder: GeocodingClient,
    forecast: ForecastClient,
    cache_enabled: bool,
    ttl: Duration,
}

impl LookupService {
    pub fn new(
        cache: WeatherCache,
        geocoder: GeocodingClient,
        forecast: ForecastClient,
        cache_enabled: bool,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            geocoder,
            forecast,
            cache_enabled,
            ttl,
        }
    }

    /// Run one lookup: serve from cache when fresh, otherwise resolve the
    /// city if needed, fetch current conditions and store the result.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<Lookup, LookupError> {
        let key = cache_key(request)?;

        if self.cache_enabled {
            if let Some(record) = self.cache.get(&key, self.ttl) {
                tracing::debug!("cache hit for {}", key);
                return Ok(Lookup {
                    record,
                    origin: Origin::Cached,
                });
            }
        }

        let coords = match request {
            LookupRequest::Coordinates {
                latitude,
                longitude,
            } => Coordinates {
                latitude: *latitude,
                longitude: *longitude,
            },
            LookupRequest::City(name) => self.geocoder.resolve(name.trim()).await?,
        };

        let record = self.forecast.fetch_current(coords).await?;

        if self.cache_enabled {
            self.cache.set(&key, &record);
        }

        Ok(Lookup {
            record,
            origin: Origin::Live,
        })
    }
}
