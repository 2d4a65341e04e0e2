//! Cache key derivation.
//!
//! Requests that name the same place must map to the same key: city names
//! are trimmed and lowercased, coordinates are bucketed to two decimal
//! places (roughly 1.1 km).

use crate::error::LookupError;
use crate::types::LookupRequest;

/// Derive the cache key for a request.
pub fn cache_key(request: &LookupRequest) -> Result<String, LookupError> {
    match request {
        LookupRequest::City(name) => {
            let normalized = name.trim().to_lowercase();
            if normalized.is_empty() {
                return Err(LookupError::InvalidRequest("city name is empty".into()));
            }
            Ok(format!("city_{}", normalized))
        }
        LookupRequest::Coordinates {
            latitude,
            longitude,
        } => Ok(format!("coords_{:.2}_{:.2}", latitude, longitude)),
    }
}
