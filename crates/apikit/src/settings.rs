//! File and environment backed configuration

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::{ClientConfiguration, DEFAULT_TIMEOUT};

/// Overrides [`Settings::base_url`]
pub const ENV_BASE_URL: &str = "APIKIT_BASE_URL";
/// Overrides [`Settings::timeout_secs`]
pub const ENV_TIMEOUT_SECS: &str = "APIKIT_TIMEOUT_SECS";

/// Errors raised while loading [`Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings source could not be read or deserialized
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// The base URL is not a valid URL
    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    /// An environment override holds a value of the wrong type
    #[error("Invalid value for {name}: {value}")]
    Env {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
}

/// Serializable form of [`ClientConfiguration`]
///
/// ```toml
/// base_url = "https://api.example.com/v1"
/// timeout_secs = 10
///
/// [default_headers]
/// Accept = "application/json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the API
    pub base_url: String,
    /// Headers sent with every request
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Settings {
    /// Load settings from a config file, format picked from its extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        Self::load(File::from(path.as_ref()))
    }

    /// Load settings from a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, SettingsError> {
        Self::load(File::from_str(toml, FileFormat::Toml))
    }

    fn load<S>(source: S) -> Result<Self, SettingsError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .set_default("timeout_secs", default_timeout_secs() as i64)?
            .add_source(source)
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Apply `APIKIT_*` environment variable overrides
    pub fn from_env(self) -> Result<Self, SettingsError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout.parse().map_err(|_| SettingsError::Env {
                name: ENV_TIMEOUT_SECS,
                value: timeout,
            })?;
        }

        Ok(self)
    }

    /// Validate and convert into a [`ClientConfiguration`]
    pub fn into_configuration(self) -> Result<ClientConfiguration, SettingsError> {
        let base_url = Url::parse(&self.base_url)?;

        Ok(ClientConfiguration::new(base_url)
            .with_default_headers(self.default_headers.into_iter().collect())
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

impl TryFrom<Settings> for ClientConfiguration {
    type Error = SettingsError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        settings.into_configuration()
    }
}
