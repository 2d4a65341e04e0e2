use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a raw Celsius value into this unit.
    ///
    /// Cached records always hold Celsius; conversion happens at display time.
    pub fn convert(&self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// What the caller wants weather for: a named city, or an exact point.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupRequest {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

/// Geographic point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at a point in time.
///
/// Produced only by the forecast client and immutable afterwards. The
/// temperature is always Celsius here regardless of display preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temperature_c: f64,
    pub wind_speed_ms: f64,
    pub wind_direction_deg: f64,
    pub weather_code: i32,
    pub observed_at: DateTime<Utc>,
}

/// Where a returned record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cached,
    Live,
}

/// A completed lookup: the record plus its origin.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub record: WeatherRecord,
    pub origin: Origin,
}

/// Human-readable text for a WMO weather code.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn weather_description(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// Map wind direction in degrees to one of 8 compass points.
pub fn compass_point(degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = ((degrees / 45.0).round() as isize).rem_euclid(8) as usize;
    POINTS[index]
}
