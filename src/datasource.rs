//! Shared SQLite connection handle.
//!
//! One `DataSource` backs both the metadata resolver and the executor for a
//! connector, so an in-memory database seen by one is seen by the other.
//!
//! Async callers go through [`DataSource::run`], which moves the blocking
//! rusqlite work onto tokio's blocking pool. There is one connection per
//! source, so calls on the same source still run one at a time.

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use rusqlite::Connection;

use crate::config::{Connector, ConnectorError, Driver};

/// Errors that can occur opening or using a data source.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Connector(#[from] ConnectorError),

    #[error("Connection lock poisoned")]
    Poisoned,

    #[error("Blocking database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type DataSourceResult<T> = Result<T, DataSourceError>;

/// A connection opened from a [`Connector`].
#[derive(Debug, Clone)]
pub struct DataSource {
    connector: Connector,
    conn: Arc<Mutex<Connection>>,
}

impl DataSource {
    /// Open the database a connector points at.
    pub fn open(connector: &Connector) -> DataSourceResult<Self> {
        connector.validate()?;
        let conn = match connector.driver {
            Driver::Sqlite if connector.is_in_memory() => Connection::open_in_memory()?,
            Driver::Sqlite => Connection::open(&connector.location)?,
        };
        debug!(
            "opened {} connector '{}' at {}",
            connector.driver.as_str(),
            connector.name,
            connector.location
        );
        Ok(Self {
            connector: connector.clone(),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> DataSourceResult<Self> {
        Self::open(&Connector::in_memory("memory"))
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    /// Run a batch of statements, e.g. a fixture script.
    pub fn execute_batch(&self, sql: &str) -> DataSourceResult<()> {
        self.lock()?.execute_batch(sql)?;
        Ok(())
    }

    /// Lock the underlying connection.
    pub(crate) fn lock(&self) -> DataSourceResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DataSourceError::Poisoned)
    }

    /// Run `f` against the connection on the blocking thread pool.
    pub(crate) async fn run<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<DataSourceError> + Send + 'static,
    {
        let source = self.clone();
        tokio::task::spawn_blocking(move || {
            let conn = source.lock()?;
            f(&conn)
        })
        .await
        .map_err(|e| E::from(DataSourceError::Task(e)))?
    }
}
