use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CITY: &str = "Dubai";
pub const DEFAULT_COUNTRY: &str = "United Arab Emirates";
pub const DEFAULT_METHOD: u8 = 2;
pub const DEFAULT_PRAYER_API_URL: &str = "https://api.aladhan.com";
pub const DEFAULT_TIME_API_URL: &str = "https://worldtimeapi.org";

/// Calculation method used by the prayer-times service for custom settings.
const CUSTOM_METHOD: u8 = 99;
const MAX_STANDARD_METHOD: u8 = 23;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub prayer: PrayerConfig,
    #[serde(default)]
    pub time_service: TimeServiceConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Where to look up prayer times. Stands in for real geolocation.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LocationConfig {
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            country: default_country(),
        }
    }
}

impl LocationConfig {
    /// Both fields are required before a prayer-time lookup can be issued.
    pub fn is_complete(&self) -> bool {
        !self.city.trim().is_empty() && !self.country.trim().is_empty()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrayerConfig {
    #[serde(default = "default_method")]
    pub method: u8,
    /// Optional API URL override (e.g. for mocking)
    #[serde(default = "default_prayer_api_url")]
    pub api_url: String,
}

fn default_method() -> u8 {
    DEFAULT_METHOD
}

fn default_prayer_api_url() -> String {
    DEFAULT_PRAYER_API_URL.to_string()
}

impl Default for PrayerConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            api_url: default_prayer_api_url(),
        }
    }
}

impl PrayerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.method > MAX_STANDARD_METHOD && self.method != CUSTOM_METHOD {
            anyhow::bail!(
                "Unknown calculation method {}, expected 0-{} or {}",
                self.method,
                MAX_STANDARD_METHOD,
                CUSTOM_METHOD
            );
        }
        if self.api_url.trim().is_empty() {
            anyhow::bail!("prayer.api_url must not be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TimeServiceConfig {
    #[serde(default = "default_time_api_url")]
    pub api_url: String,
}

fn default_time_api_url() -> String {
    DEFAULT_TIME_API_URL.to_string()
}

impl Default for TimeServiceConfig {
    fn default() -> Self {
        Self {
            api_url: default_time_api_url(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NetworkConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingSection {
    /// env_logger filter, e.g. "debug" or "iftar_countdown=debug"
    #[serde(default)]
    pub level: Option<String>,
}

impl Config {
    /// Validate all configuration
    pub fn validate(&self) -> Result<()> {
        self.prayer.validate()?;
        if self.time_service.api_url.trim().is_empty() {
            anyhow::bail!("time_service.api_url must not be empty");
        }
        if self.network.request_timeout_secs == 0 {
            anyhow::bail!("network.request_timeout_secs must be greater than 0");
        }
        Ok(())
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        city: Option<String>,
        country: Option<String>,
        method: Option<u8>,
    ) -> Self {
        if let Some(city) = city {
            self.location.city = city;
        }
        if let Some(country) = country {
            self.location.country = country;
        }
        if let Some(method) = method {
            self.prayer.method = method;
        }
        self
    }
}

pub fn default_path() -> Result<PathBuf> {
    let path = home::home_dir()
        .context("Could not find home directory")?
        .join(".iftar-countdown")
        .join("config.toml");
    Ok(path)
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .build()
        .context("Failed to build config loader")?;

    let config: Config = loader
        .try_deserialize()
        .context("Failed to parse config file")?;

    config.validate()?;

    Ok(config)
}

/// Load the config file. A missing file is `Ok(None)`; a broken one is an error.
pub fn load(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    load_from_path(path).map(Some)
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    std::fs::write(path, toml_string).context("Failed to write config file")?;

    Ok(())
}
