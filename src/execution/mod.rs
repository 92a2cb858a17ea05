//! SQL execution module.
//!
//! Runs translated SQL against a backend. Translation never depends on this
//! module; execution errors are reported as the backend produced them.

mod sqlite;

pub use sqlite::SqliteExecutor;

use async_trait::async_trait;
use serde::Serialize;

use crate::datasource::DataSourceError;

/// Errors raised while executing SQL.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Backend error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),
}

/// Result type for execution.
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Rows returned by a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as column-name keyed JSON objects.
    ///
    /// Later duplicate column names overwrite earlier ones.
    pub fn to_objects(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

/// Trait for running SQL text against a configured backend.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Run a query and collect every row.
    async fn query(&self, sql: &str) -> ExecutionResult<ResultSet>;

    /// Number of rows a query returns.
    async fn count(&self, sql: &str) -> ExecutionResult<usize> {
        Ok(self.query(sql).await?.len())
    }
}
