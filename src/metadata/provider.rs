//! MetadataResolver trait definition.
//!
//! The MetadataResolver trait abstracts over the ways a bare table name can
//! be turned into a table with a known column set. Resolution is the only
//! place cube building touches a live backend.

use async_trait::async_trait;

use crate::config::Connector;
use crate::datasource::DataSourceError;
use crate::model::Table;

/// Errors raised while resolving metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Table not found: {table} (connector '{connector}')")]
    TableNotFound { connector: String, table: String },

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Trait for resolving tables against a connector.
///
/// # Example
///
/// ```ignore
/// use mipha::metadata::MetadataResolver;
/// use mipha::model::Table;
///
/// async fn example(resolver: &impl MetadataResolver) -> MetadataResult<()> {
///     let voucher = resolver.resolve_table(Table::new("BANK_VOUCHER")).await?;
///     let account_no = voucher.field("ACCOUNT_NO")?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// The connector this resolver answers for.
    fn connector(&self) -> &Connector;

    /// List the names of all tables visible through the connector.
    async fn list_tables(&self) -> MetadataResult<Vec<String>>;

    /// Resolve an unresolved table into one with its full column set.
    ///
    /// The caller alias on `table` is kept. Fails with
    /// [`MetadataError::TableNotFound`] if the connector has no such table.
    async fn resolve_table(&self, table: Table) -> MetadataResult<Table>;

    /// Resolve several tables by name.
    ///
    /// Default implementation resolves them concurrently using `join_all`.
    async fn resolve_tables(&self, names: &[&str]) -> MetadataResult<Vec<Table>> {
        let futures: Vec<_> = names
            .iter()
            .map(|name| self.resolve_table(Table::new(name)))
            .collect();

        let results = futures::future::join_all(futures).await;

        // Collect results, failing if any failed
        results.into_iter().collect()
    }
}
