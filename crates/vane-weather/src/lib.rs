//! Weather lookup for Vane
//!
//! Provides current conditions via the Open-Meteo forecast and geocoding
//! APIs with a TTL-bounded on-disk cache.

pub mod types;
pub mod error;
pub mod key;
pub mod cache;
pub mod geocode;
pub mod provider;
pub mod service;

pub use types::*;
pub use error::LookupError;
pub use key::cache_key;
pub use cache::WeatherCache;
pub use geocode::GeocodingClient;
pub use provider::ForecastClient;
pub use service::LookupService;
