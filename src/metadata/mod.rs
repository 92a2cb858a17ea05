//! Metadata resolution module.
//!
//! Turns bare table names into [`Table`](crate::model::Table) values with a
//! known column set, so fields can be looked up before a cube is built.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              MetadataResolver                │
//! │  - list_tables()                             │
//! │  - resolve_table(Table::new(name))           │
//! │  - resolve_tables(&[names])  (concurrent)    │
//! └──────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │        DataSource (SQLite connection)        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The translator never calls into this module; it only reads fields that
//! were resolved beforehand.

mod provider;
mod sqlite;

pub use provider::{MetadataError, MetadataResolver, MetadataResult};
pub use sqlite::SqliteMetadataResolver;
