//! Lookup backend: async weather fetching.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use vane_weather::{Lookup, LookupError, LookupRequest, LookupService};

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum ServiceMessage {
    /// Result of a weather lookup
    LookupDone(Result<Lookup, LookupError>),
}

/// Request a lookup asynchronously.
/// Sends `LookupDone` on the channel when complete and triggers `repaint`.
pub fn request_lookup(
    tx: &Sender<ServiceMessage>,
    runtime: &tokio::runtime::Handle,
    service: Arc<LookupService>,
    request: LookupRequest,
    repaint: impl Fn() + Send + 'static,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = service.lookup(&request).await;
        if let Err(e) = &result {
            tracing::warn!("lookup failed: {}", e);
        }
        let _ = tx.send(ServiceMessage::LookupDone(result));
        repaint();
    });
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::sync::mpsc::channel;
    use vane_weather::{ForecastClient, GeocodingClient, WeatherCache};

    #[test]
    fn test_lookup_done_arrives_on_channel() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(LookupService::new(
            WeatherCache::new(dir.path().join("weather_cache.json")),
            GeocodingClient::new().unwrap(),
            ForecastClient::new().unwrap(),
            true,
            chrono::Duration::hours(1),
        ));

        let (tx, rx) = channel();

        // A blank city fails fast without touching the network, which keeps
        // this test offline while still exercising the full channel path.
        request_lookup(
            &tx,
            runtime.handle(),
            service,
            LookupRequest::City("  ".to_string()),
            || {},
        );

        let message = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        let ServiceMessage::LookupDone(result) = message;
        assert!(matches!(result, Err(LookupError::InvalidRequest(_))));
    }
}
