//! Human-readable report formatting for lookup results.

use vane_weather::{compass_point, weather_description, Lookup, Origin, TemperatureUnit};

/// Format a completed lookup as a multi-line report.
pub fn format_report(lookup: &Lookup, units: TemperatureUnit) -> String {
    let record = &lookup.record;
    let origin = match lookup.origin {
        Origin::Cached => "from cache",
        Origin::Live => "live",
    };

    let lines = [
        format!("Current weather ({})", origin),
        format!(
            "  Temperature: {:.1} {}",
            units.convert(record.temperature_c),
            units.symbol()
        ),
        format!("  Conditions:  {}", weather_description(record.weather_code)),
        format!(
            "  Wind:        {:.1} m/s {}",
            record.wind_speed_ms,
            compass_point(record.wind_direction_deg)
        ),
        format!(
            "  Observed:    {}",
            record.observed_at.format("%Y-%m-%d %H:%M UTC")
        ),
    ];

    lines.join("\n")
}
