//! Configuration management for the Tavros signage server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the check-in scraper API
    pub checkin_base_url: String,
    /// URL of the published carousel sheet (CSV export)
    pub sheet_csv_url: String,
    /// Seconds between check-in refreshes
    pub checkin_refresh_secs: u64,
    /// Seconds between carousel sheet refreshes
    pub sheet_refresh_secs: u64,
    /// Seconds between keep-alive pings to the scraper host
    pub keep_alive_secs: u64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Retries after a failed fetch within one refresh tick
    pub fetch_retries: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CarouselConfig {
    /// Slide duration applied when the sheet gives none (seconds)
    pub default_slide_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Gym-local offset from UTC in hours (Mexico City: -6)
    pub utc_offset_hours: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Directory for daily-rolling log files; disabled when unset
    pub directory: Option<String>,
    /// Emit to journald as well (systemd kiosk deployments)
    pub journald: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix TAVROS_)
            .add_source(
                Environment::with_prefix("TAVROS")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override upstream URLs from plain env vars if present
            .set_override_option("upstream.checkin_base_url", env::var("CHECKIN_API_URL").ok())?
            .set_override_option("upstream.sheet_csv_url", env::var("SHEET_CSV_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            checkin_base_url: "https://tavros-scraper-1.onrender.com".to_string(),
            sheet_csv_url: String::new(),
            checkin_refresh_secs: 300,
            sheet_refresh_secs: 60,
            keep_alive_secs: 600,
            request_timeout_secs: 10,
            fetch_retries: 2,
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            default_slide_secs: 10,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: -6,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
            journald: false,
        }
    }
}
