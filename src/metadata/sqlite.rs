//! SQLite-backed metadata resolution.

use async_trait::async_trait;
use log::debug;
use rusqlite::{params, OptionalExtension};

use super::provider::{MetadataError, MetadataResolver, MetadataResult};
use crate::config::Connector;
use crate::datasource::DataSource;
use crate::model::{Column, Table};

/// Resolves tables from `sqlite_master` and `pragma_table_info`.
#[derive(Debug, Clone)]
pub struct SqliteMetadataResolver {
    source: DataSource,
}

impl SqliteMetadataResolver {
    pub fn new(source: DataSource) -> Self {
        Self { source }
    }
}

#[async_trait]
impl MetadataResolver for SqliteMetadataResolver {
    fn connector(&self) -> &Connector {
        self.source.connector()
    }

    async fn list_tables(&self) -> MetadataResult<Vec<String>> {
        self.source
            .run(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master \
                     WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' \
                     ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .await
    }

    async fn resolve_table(&self, table: Table) -> MetadataResult<Table> {
        let connector = self.source.connector().name.clone();

        let resolved = self
            .source
            .run(move |conn| {
                let canonical: Option<String> = conn
                    .query_row(
                        "SELECT name FROM sqlite_master \
                         WHERE type IN ('table', 'view') AND name = ?1 COLLATE NOCASE",
                        params![table.name],
                        |row| row.get(0),
                    )
                    .optional()?;

                let Some(name) = canonical else {
                    return Err(MetadataError::TableNotFound {
                        connector,
                        table: table.name,
                    });
                };

                let mut stmt = conn.prepare(
                    "SELECT name, type, \"notnull\" FROM pragma_table_info(?1) ORDER BY cid",
                )?;
                let columns = stmt
                    .query_map(params![name], |row| {
                        let mut column = Column::new(&row.get::<_, String>(0)?);
                        let data_type: String = row.get(1)?;
                        if !data_type.is_empty() {
                            column = column.with_type(&data_type);
                        }
                        if row.get::<_, bool>(2)? {
                            column = column.not_null();
                        }
                        Ok(column)
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Table {
                    name,
                    alias: table.alias,
                    columns: Some(columns),
                })
            })
            .await?;

        debug!(
            "resolved table {} with {} column(s)",
            resolved.name,
            resolved.columns.as_ref().map_or(0, Vec::len)
        );
        Ok(resolved)
    }
}
