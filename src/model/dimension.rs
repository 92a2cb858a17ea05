// src/model/dimension.rs
use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::table::TableLike;

/// How a dimension is joined into the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    Inner,
    Left,
}

impl JoinType {
    /// Parse from `inner` / `left` (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inner" => Some(JoinType::Inner),
            "left" | "left outer" => Some(JoinType::Left),
            _ => None,
        }
    }
}

/// One join step: a target attached through a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub join_type: JoinType,
    pub target: TableLike,
    pub condition: Condition,
}

impl Dimension {
    pub fn new(join_type: JoinType, target: impl Into<TableLike>, condition: Condition) -> Self {
        Self {
            join_type,
            target: target.into(),
            condition,
        }
    }
}
