use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;
use vane_weather::TemperatureUnit;

const GEOCODING_API_URL: &str = "https://geocoding-api.open-meteo.com";
const FORECAST_API_URL: &str = "https://api.open-meteo.com";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Lookup and caching settings
    #[serde(default)]
    pub lookup: LookupConfig,

    /// GUI preferences
    #[serde(default)]
    pub gui: GuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Whether to serve and store cached results
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    /// Cache time-to-live in minutes
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,

    /// Temperature unit for display (cached values stay Celsius)
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,

    /// Overrides the default cache file location when set
    #[serde(default)]
    pub cache_file: Option<PathBuf>,

    /// Base URL of the geocoding API
    #[serde(default = "default_geocoding_api_url")]
    pub geocoding_api_url: String,

    /// Base URL of the forecast API
    #[serde(default = "default_forecast_api_url")]
    pub forecast_api_url: String,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_ttl_minutes() -> u64 {
    60
}

fn default_geocoding_api_url() -> String {
    GEOCODING_API_URL.to_string()
}

fn default_forecast_api_url() -> String {
    FORECAST_API_URL.to_string()
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            cache_enabled: default_cache_enabled(),
            ttl_minutes: default_ttl_minutes(),
            temperature_unit: TemperatureUnit::default(),
            cache_file: None,
            geocoding_api_url: default_geocoding_api_url(),
            forecast_api_url: default_forecast_api_url(),
        }
    }
}

impl LookupConfig {
    /// Cache TTL as a duration.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.ttl_minutes as i64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuiConfig {
    /// Window width
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Window height
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

fn default_window_width() -> u32 {
    360
}

fn default_window_height() -> u32 {
    240
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(
            &self.lookup.geocoding_api_url,
            "lookup.geocoding_api_url",
            &mut result,
        );
        self.validate_url(
            &self.lookup.forecast_api_url,
            "lookup.forecast_api_url",
            &mut result,
        );

        if self.lookup.ttl_minutes == 0 {
            result.add_warning(
                "lookup.ttl_minutes",
                "Zero TTL means every cached entry is already stale",
            );
        } else if self.lookup.ttl_minutes > 1440 {
            result.add_warning(
                "lookup.ttl_minutes",
                "Cache TTL is more than 24 hours; results may be very outdated",
            );
        }

        if self.gui.window_width == 0 {
            result.add_error("gui.window_width", "Window width must be greater than 0");
        } else if self.gui.window_width > 10000 {
            result.add_warning("gui.window_width", "Window width is unusually large (>10000)");
        }

        if self.gui.window_height == 0 {
            result.add_error("gui.window_height", "Window height must be greater than 0");
        } else if self.gui.window_height > 10000 {
            result.add_warning(
                "gui.window_height",
                "Window height is unusually large (>10000)",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Resolve the cache file location: the configured override, or
    /// `weather_cache.json` next to the config file.
    pub fn cache_file(&self) -> PathBuf {
        if let Some(path) = &self.lookup.cache_file {
            return path.clone();
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vane")
            .join("weather_cache.json")
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("vane");

        Ok(config_dir.join("config.toml"))
    }
}
