//! Cube model: tables, fields, conditions, dimensions and cubes.
//!
//! Values here are plain data. Nothing in this module performs I/O or
//! renders SQL; resolution lives in [`crate::metadata`] and rendering in
//! [`crate::translator`].

pub mod condition;
pub mod cube;
pub mod dimension;
pub mod error;
pub mod table;

pub use condition::{Comparator, Condition, Operand};
pub use cube::{Cube, CubeBuilder};
pub use dimension::{Dimension, JoinType};
pub use error::{ModelError, ModelResult};
pub use table::{Column, Field, JoinExpression, Table, TableKey, TableLike};
