//! SQL generation module.
//!
//! A small, type-safe SQL builder for the queries a cube translates to:
//!
//! - [`query`] - SELECT ... FROM ... JOIN builder
//! - [`expr`] - Join predicate expressions
//! - [`token`] - Token types for SQL generation

pub mod expr;
pub mod query;
pub mod token;

pub use expr::{raw, table_col, BinaryOperator, Expr};
pub use query::{Join, JoinKind, Query, Relation, SelectExpr, TableRef};
pub use token::{Token, TokenStream};
