//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` (or the file named by `BILLDONE_CONFIG`), then
//! overridden by `BILLDONE_`-prefixed environment variables, e.g.
//! `BILLDONE_DATABASE__URL` or `BILLDONE_LOGGER__ENABLED=false`.
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub host: String,
    pub port: u16,
}

impl Default for App {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Database {
    /// Any `sea-orm` SQLite url, e.g. `sqlite::memory:`.
    pub url: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            url: "sqlite:billdone.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Logger {
    pub level: String,
    pub enabled: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enabled: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub database: Database,
    pub logger: Logger,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path =
            std::env::var("BILLDONE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_sources(File::with_name(&path).required(false), environment())
    }

    fn from_sources<S>(file: S, env: Environment) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("BILLDONE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
