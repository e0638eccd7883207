//! # configs
//!
//! Layered settings: built-in defaults, then an optional TOML file, then
//! `PORTAL__SECTION__KEY` environment variables (a `.env` file is read
//! first if present).

use std::time::Duration;

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "config/portal";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ApiSettings {
    /// Backend origin, e.g. `http://localhost:8080`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthSettings {
    /// Bearer token sent with every backend call.
    #[serde(default)]
    pub access_token: Option<SecretString>,
    /// Nickname of the signed-in viewer; drives edit/delete controls.
    #[serde(default)]
    pub nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

impl Settings {
    /// Loads from `.env`, [`DEFAULT_CONFIG_FILE`] and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_with(None)
    }

    /// Like [`load`](Self::load), with `file` replacing the default file layer.
    pub fn load_with(file: Option<&str>) -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::load_from(file.unwrap_or(DEFAULT_CONFIG_FILE))
    }

    /// Loads with `file` (any extension `config` understands) as the
    /// optional file layer.
    pub fn load_from(file: &str) -> Result<Self, SettingsError> {
        Self::load_layers(file, true)
    }

    fn load_layers(file: &str, with_env: bool) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("api.base_url", "http://localhost:8080")?
            .set_default("api.timeout_secs", 10)?
            .set_default("log.filter", "info")?
            .set_default("log.json", false)?
            .add_source(File::with_name(file).required(false));
        if with_env {
            builder = builder.add_source(
                Environment::with_prefix("PORTAL")
                    .prefix_separator("__")
                    .separator("__"),
            );
        }
        let settings: Settings = builder.build()?.try_deserialize()?;

        settings.validate()?;
        debug!(
            base_url = %settings.api.base_url,
            authenticated = settings.auth.access_token.is_some(),
            "settings loaded"
        );
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingsError::Invalid {
                key: "api.base_url",
                reason: format!("expected an http(s) URL, got {url:?}"),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "api.timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
