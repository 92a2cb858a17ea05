//! Connector configuration.
//!
//! A connector names a backend the metadata resolver and executor talk to.

use serde::{Deserialize, Serialize};

/// Error type for connector configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("Unsupported driver: {0}. Supported: sqlite")]
    UnsupportedDriver(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Supported backend drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// SQLite (file or in-memory)
    Sqlite,
}

impl Driver {
    /// Parse driver from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConnectorError> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            other => Err(ConnectorError::UnsupportedDriver(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::Sqlite => "sqlite",
        }
    }
}

/// Location of an in-memory SQLite database.
pub const IN_MEMORY: &str = ":memory:";

/// A configured connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub name: String,
    pub driver: Driver,
    /// File path for SQLite, or `:memory:`
    pub location: String,
}

impl Connector {
    pub fn sqlite(name: &str, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: Driver::Sqlite,
            location: location.into(),
        }
    }

    /// An in-memory SQLite connector, mostly for tests and demos.
    pub fn in_memory(name: &str) -> Self {
        Self::sqlite(name, IN_MEMORY)
    }

    pub fn is_in_memory(&self) -> bool {
        self.location == IN_MEMORY
    }

    pub fn validate(&self) -> Result<(), ConnectorError> {
        if self.location.trim().is_empty() {
            return Err(ConnectorError::InvalidConfig(format!(
                "connector '{}' has an empty location",
                self.name
            )));
        }
        Ok(())
    }
}
