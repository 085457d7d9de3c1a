use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub artifacts: ArtifactsConfig,
    pub holidays: HolidaysConfig,
    pub scraper: ScraperConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Furthest departure date, in days from today, a prediction accepts.
    #[serde(default = "default_max_horizon_days")]
    pub max_horizon_days: i64,
}

fn default_max_horizon_days() -> i64 { 365 }

/// Files produced by the training notebook.
#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactsConfig {
    pub distances_path: String,
    pub model_path: String,
    pub departure_encoder_path: String,
    pub arrival_encoder_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HolidaysConfig {
    pub public_url: String,
    pub school_url: String,
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

fn default_window_days() -> i64 { 7 }

#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    pub output_path: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `FAREDAY_SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("FAREDAY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
