//! Settings for the application, read from `settings.toml` plus
//! `SAHYAATRA__*` environment overrides. API keys belong in the
//! environment, not in the file.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

/// Gemini assistant access. Without a key the assistant endpoints serve
/// their fallbacks.
#[derive(Debug, Deserialize)]
pub struct Assist {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

/// Photo provider access. Both providers are optional.
#[derive(Debug, Deserialize)]
pub struct Photos {
    pub pexels_url: Option<String>,
    pub pexels_key: Option<String>,
    pub unsplash_url: Option<String>,
    pub unsplash_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
    pub assist: Option<Assist>,
    pub photos: Option<Photos>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .add_source(Environment::with_prefix("SAHYAATRA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
