use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_WEATHER_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";
pub const DEFAULT_GEOIP_URL: &str = "https://ipinfo.io/json";

/// Environment variables read on top of the config file.
pub const WEATHER_API_KEY_ENV: &str = "WEATHER_API_KEY";
pub const LEGACY_WEATHER_API_KEY_ENV: &str = "API_KEY";
pub const GEOIP_TOKEN_ENV: &str = "GEOIP_TOKEN";

/// Visual Crossing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherServiceConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for WeatherServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// ipinfo.io settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoIpConfig {
    pub token: Option<String>,
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            token: None,
            url: DEFAULT_GEOIP_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Background job queue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Jobs buffered in the broker before `submit` waits for room.
    pub queue_capacity: usize,
    /// Jobs executing at the same time.
    pub concurrency: usize,
    /// Default submitter-side wait.
    pub wait_timeout_secs: u64,
}

impl JobConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 32,
            concurrency: 4,
            wait_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when no log environment variable is set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

/// Top-level configuration.
///
/// Example TOML:
/// [weather]
/// api_key = "..."
///
/// [geoip]
/// token = "..."
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub weather: WeatherServiceConfig,
    pub geoip: GeoIpConfig,
    pub jobs: JobConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from disk (defaults if no file exists), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;

        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            Self::from_toml_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        cfg.apply_env_with(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Override credentials from environment-like lookups. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) =
            non_empty(WEATHER_API_KEY_ENV).or_else(|| non_empty(LEGACY_WEATHER_API_KEY_ENV))
        {
            self.weather.api_key = Some(key);
        }

        if let Some(token) = non_empty(GEOIP_TOKEN_ENV) {
            self.geoip.token = Some(token);
        }
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "daily-weather", "daily-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn weather_api_key(&self) -> Result<&str> {
        self.weather.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No weather service credential configured.\n\
                 Hint: set {WEATHER_API_KEY_ENV} or `weather.api_key` in the config file."
            )
        })
    }

    pub fn geoip_token(&self) -> Result<&str> {
        self.geoip.token.as_deref().ok_or_else(|| {
            anyhow!(
                "No geo-IP service credential configured.\n\
                 Hint: set {GEOIP_TOKEN_ENV} or `geoip.token` in the config file."
            )
        })
    }
}
