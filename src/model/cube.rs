// src/model/cube.rs
use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::dimension::{Dimension, JoinType};
use super::table::TableLike;

/// A fact table plus its attached dimensions.
///
/// The fact is fixed at construction. Dimensions are append-only and their
/// order is significant: it is the order of the emitted JOIN clauses and so
/// decides which aliases a later condition can see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    name: String,
    fact: TableLike,
    dimensions: Vec<Dimension>,
}

impl Cube {
    pub fn new(name: &str, fact: impl Into<TableLike>) -> Self {
        Self {
            name: name.into(),
            fact: fact.into(),
            dimensions: Vec::new(),
        }
    }

    /// Start a builder for a cube rooted at `fact`.
    pub fn builder(name: &str, fact: impl Into<TableLike>) -> CubeBuilder {
        CubeBuilder {
            cube: Cube::new(name, fact),
        }
    }

    /// Append a dimension.
    ///
    /// No check is made that the condition only references tables already
    /// in the cube.
    pub fn add_dimension(
        &mut self,
        join_type: JoinType,
        target: impl Into<TableLike>,
        condition: Condition,
    ) -> &mut Self {
        self.dimensions
            .push(Dimension::new(join_type, target, condition));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fact(&self) -> &TableLike {
        &self.fact
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }
}

/// Fluent builder for [`Cube`].
#[derive(Debug, Clone)]
#[must_use = "builders have no effect until built"]
pub struct CubeBuilder {
    cube: Cube,
}

impl CubeBuilder {
    /// Attach a dimension.
    pub fn dimension(
        mut self,
        join_type: JoinType,
        target: impl Into<TableLike>,
        condition: Condition,
    ) -> Self {
        self.cube.add_dimension(join_type, target, condition);
        self
    }

    /// Attach an INNER JOIN dimension.
    pub fn inner_join(self, target: impl Into<TableLike>, condition: Condition) -> Self {
        self.dimension(JoinType::Inner, target, condition)
    }

    /// Attach a LEFT JOIN dimension.
    pub fn left_join(self, target: impl Into<TableLike>, condition: Condition) -> Self {
        self.dimension(JoinType::Left, target, condition)
    }

    pub fn build(self) -> Cube {
        self.cube
    }
}
