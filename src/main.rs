use anyhow::Result;
use clap::Parser;
use vane_weather::{ForecastClient, GeocodingClient, LookupService, WeatherCache};

mod cli;
mod render;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    vane_core::init()?;

    let args = cli::Cli::parse();
    let (config, _validation) = vane_core::Config::load_validated()?;

    let units = args
        .units
        .map(Into::into)
        .unwrap_or(config.lookup.temperature_unit);
    let cache_enabled = config.lookup.cache_enabled && !args.no_cache;

    tracing::debug!(
        "cache file: {}, caching {}",
        config.cache_file().display(),
        if cache_enabled { "on" } else { "off" }
    );

    let service = LookupService::new(
        WeatherCache::new(config.cache_file()),
        GeocodingClient::new_with_base_url(&config.lookup.geocoding_api_url)?,
        ForecastClient::new_with_base_url(&config.lookup.forecast_api_url)?,
        cache_enabled,
        config.lookup.ttl(),
    );

    let lookup = service.lookup(&args.request()).await?;
    println!("{}", render::format_report(&lookup, units));

    Ok(())
}
