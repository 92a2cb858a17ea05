//! SQLite-backed execution.
//!
//! Statements run on tokio's blocking pool; queries sharing a
//! [`DataSource`] are serialized on its connection.

use async_trait::async_trait;
use log::debug;
use rusqlite::types::ValueRef;

use super::{ExecutionError, ExecutionResult, ResultSet, SqlExecutor};
use crate::datasource::DataSource;

/// Executes SQL on a [`DataSource`].
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    source: DataSource,
}

impl SqliteExecutor {
    pub fn new(source: DataSource) -> Self {
        Self { source }
    }
}

#[async_trait]
impl SqlExecutor for SqliteExecutor {
    async fn query(&self, sql: &str) -> ExecutionResult<ResultSet> {
        let sql = sql.to_string();
        let result = self
            .source
            .run(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let columns: Vec<String> =
                    stmt.column_names().into_iter().map(String::from).collect();
                let width = columns.len();

                let mut rows = Vec::new();
                let mut cursor = stmt.query([])?;
                while let Some(row) = cursor.next()? {
                    let mut values = Vec::with_capacity(width);
                    for i in 0..width {
                        values.push(to_json(row.get_ref(i)?));
                    }
                    rows.push(values);
                }
                Ok::<_, ExecutionError>(ResultSet { columns, rows })
            })
            .await?;

        debug!(
            "query on '{}' returned {} row(s)",
            self.source.connector().name,
            result.len()
        );
        Ok(result)
    }
}

fn to_json(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(i) => serde_json::Value::from(i),
        ValueRef::Real(f) => serde_json::Value::from(f),
        ValueRef::Text(bytes) => {
            serde_json::Value::from(String::from_utf8_lossy(bytes).into_owned())
        }
        ValueRef::Blob(bytes) => serde_json::Value::from(bytes.to_vec()),
    }
}
