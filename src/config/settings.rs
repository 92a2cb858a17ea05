//! TOML-based configuration for mipha.
//!
//! Supports a config file (mipha.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! default_connector = "sample"
//!
//! [connectors.sample]
//! driver = "sqlite"
//! location = "${MIPHA_DATA}/sample.db"
//!
//! [connectors.scratch]
//! driver = "sqlite"
//! location = ":memory:"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::connector::{Connector, ConnectorError};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Connector not found: {0}")]
    ConnectorNotFound(String),

    #[error("No connector configured")]
    NoConnector,

    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Connector used when none is named explicitly.
    pub default_connector: Option<String>,

    /// Named connectors.
    pub connectors: HashMap<String, ConnectorSettings>,
}

/// Connector configuration as written in the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectorSettings {
    /// Backend driver (sqlite).
    pub driver: String,

    /// Database location (supports ${ENV_VAR} expansion).
    pub location: String,
}

impl ConnectorSettings {
    /// Build a validated connector, expanding environment variables.
    pub fn to_connector(&self, name: &str) -> Result<Connector, SettingsError> {
        let driver = super::connector::Driver::from_str(&self.driver)?;
        let connector = Connector {
            name: name.to_string(),
            driver,
            location: expand_env_vars(&self.location)?,
        };
        connector.validate()?;
        Ok(connector)
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `MIPHA_CONFIG`
    /// 2. `./mipha.toml`
    /// 3. `<config dir>/mipha/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("MIPHA_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("mipha.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("mipha").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Get a connector by name.
    pub fn connector(&self, name: &str) -> Result<Connector, SettingsError> {
        self.connectors
            .get(name)
            .ok_or_else(|| SettingsError::ConnectorNotFound(name.to_string()))?
            .to_connector(name)
    }

    /// The connector to use when none is named.
    ///
    /// Picks `default_connector`, then a connector called "default", then
    /// the only connector if exactly one is configured.
    pub fn default_connector(&self) -> Result<Connector, SettingsError> {
        if let Some(name) = &self.default_connector {
            return self.connector(name);
        }
        if self.connectors.contains_key("default") {
            return self.connector("default");
        }
        match self.connectors.len() {
            1 => {
                let name = self.connectors.keys().next().ok_or(SettingsError::NoConnector)?;
                self.connector(name)
            }
            _ => Err(SettingsError::NoConnector),
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                var_name.push(ch);
                chars.next();
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
