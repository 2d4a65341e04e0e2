//! Command-line argument definitions.

use clap::{ArgGroup, Parser, ValueEnum};
use vane_weather::{LookupRequest, TemperatureUnit};

#[derive(Debug, Parser)]
#[command(
    name = "vane",
    version,
    about = "Current weather for a city or coordinates",
    group(ArgGroup::new("target").required(true).args(["city", "coords"]))
)]
pub struct Cli {
    /// City name to look up (e.g. "Москва" or "Berlin")
    #[arg(long, short = 'c')]
    pub city: Option<String>,

    /// Coordinates to look up (e.g. --coords 55.7558 37.6173)
    #[arg(long, num_args = 2, allow_negative_numbers = true, value_names = ["LATITUDE", "LONGITUDE"])]
    pub coords: Option<Vec<f64>>,

    /// Temperature units for display
    #[arg(long, value_enum)]
    pub units: Option<UnitsArg>,

    /// Bypass the on-disk cache for this lookup
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitsArg> for TemperatureUnit {
    fn from(units: UnitsArg) -> Self {
        match units {
            UnitsArg::Celsius => TemperatureUnit::Celsius,
            UnitsArg::Fahrenheit => TemperatureUnit::Fahrenheit,
        }
    }
}

impl Cli {
    /// Build the lookup request from whichever target argument was given.
    pub fn request(&self) -> LookupRequest {
        if let Some(city) = &self.city {
            return LookupRequest::City(city.clone());
        }

        // clap's group guarantees coords is present here, with exactly two values.
        let coords = self.coords.as_deref().unwrap_or(&[0.0, 0.0]);
        LookupRequest::Coordinates {
            latitude: coords.first().copied().unwrap_or_default(),
            longitude: coords.get(1).copied().unwrap_or_default(),
        }
    }
}
