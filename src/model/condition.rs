// src/model/condition.rs
use serde::{Deserialize, Serialize};

use super::table::{Field, JoinExpression};

/// Relational operator of a join condition.
///
/// `Unsupported` carries comparator text that has no SQL mapping; it is
/// accepted here and rejected at translation time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Comparator {
    #[default]
    Equals,
    NotEquals,
    Greater,
    GreaterOrEquals,
    Less,
    LessOrEquals,
    Like,
    NotLike,
    Unsupported(String),
}

impl Comparator {
    /// Parse a comparator from its symbol or name.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" | "equals" => Comparator::Equals,
            "<>" | "!=" | "ne" | "not_equals" => Comparator::NotEquals,
            ">" | "gt" | "greater" => Comparator::Greater,
            ">=" | "gte" | "greater_or_equals" => Comparator::GreaterOrEquals,
            "<" | "lt" | "less" => Comparator::Less,
            "<=" | "lte" | "less_or_equals" => Comparator::LessOrEquals,
            "like" => Comparator::Like,
            "not like" | "not_like" => Comparator::NotLike,
            _ => Comparator::Unsupported(trimmed.to_string()),
        }
    }
}

impl From<&str> for Comparator {
    fn from(s: &str) -> Self {
        Comparator::parse(s)
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparator::Equals => write!(f, "EQUALS"),
            Comparator::NotEquals => write!(f, "NOT_EQUALS"),
            Comparator::Greater => write!(f, "GREATER"),
            Comparator::GreaterOrEquals => write!(f, "GREATER_OR_EQUALS"),
            Comparator::Less => write!(f, "LESS"),
            Comparator::LessOrEquals => write!(f, "LESS_OR_EQUALS"),
            Comparator::Like => write!(f, "LIKE"),
            Comparator::NotLike => write!(f, "NOT_LIKE"),
            Comparator::Unsupported(s) => write!(f, "{}", s),
        }
    }
}

/// One side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Rendered as `<alias>.<column>`
    Field(Field),
    /// Rendered verbatim
    Expression(JoinExpression),
}

impl From<Field> for Operand {
    fn from(field: Field) -> Self {
        Operand::Field(field)
    }
}

impl From<JoinExpression> for Operand {
    fn from(expr: JoinExpression) -> Self {
        Operand::Expression(expr)
    }
}

/// A binary join predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub left: Operand,
    pub right: Operand,
    pub comparator: Comparator,
}

impl Condition {
    /// An equality condition.
    pub fn new(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::with_comparator(left, right, Comparator::Equals)
    }

    pub fn with_comparator(
        left: impl Into<Operand>,
        right: impl Into<Operand>,
        comparator: impl Into<Comparator>,
    ) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            comparator: comparator.into(),
        }
    }
}
