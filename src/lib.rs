//! # Mipha
//!
//! Describe an OLAP cube as a fact table plus an ordered chain of joined
//! dimensions, and translate it into ANSI join SQL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Cube definition (TOML) or builder calls           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metadata resolver]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Model (Rust Types)                      │
//! │   Table / JoinExpression, Field, Condition, Dimension    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [translator]
//! ┌─────────────────────────────────────────────────────────┐
//! │             SQL Query (token stream → text)              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [executor]
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Result rows                         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Translation is pure: it needs no connection and never fails on scope
//! problems. Metadata resolution and execution go through the
//! [`metadata::MetadataResolver`] and [`execution::SqlExecutor`] traits.

pub mod config;
pub mod datasource;
pub mod definition;
pub mod execution;
pub mod metadata;
pub mod model;
pub mod sql;
pub mod translator;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{Connector, Settings};
    pub use crate::datasource::DataSource;
    pub use crate::definition::CubeDefinition;
    pub use crate::execution::{ResultSet, SqlExecutor, SqliteExecutor};
    pub use crate::metadata::{MetadataResolver, SqliteMetadataResolver};
    pub use crate::model::{
        Column, Comparator, Condition, Cube, CubeBuilder, Dimension, Field, JoinExpression,
        JoinType, Operand, Table, TableKey, TableLike,
    };
    pub use crate::translator::{ScopeDiagnostic, SqlTranslator, Translation};
}

// Also export at crate root for convenience
pub use model::{Condition, Cube, Table, TableLike};
pub use translator::SqlTranslator;
