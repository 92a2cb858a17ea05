//! Configuration module for mipha.
//!
//! Handles connector configuration, environment variables, and settings.

mod connector;
mod settings;

pub use connector::{Connector, ConnectorError, Driver, IN_MEMORY};
pub use settings::{expand_env_vars, ConnectorSettings, Settings, SettingsError};
