// src/model/table.rs
use serde::{Deserialize, Serialize};

use super::error::{ModelError, ModelResult};

/// Identity of a table-like source within one cube-building session.
///
/// Fields and expressions point back at their owner through this key rather
/// than holding the table itself. Attaching the same physical table twice
/// requires a caller alias on one of the copies so the keys differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableKey {
    pub name: String,
    pub alias: Option<String>,
}

impl TableKey {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Same source, comparing names and aliases ASCII case-insensitively.
    pub fn matches(&self, other: &TableKey) -> bool {
        let alias_matches = match (&self.alias, &other.alias) {
            (None, None) => true,
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        };
        alias_matches && self.name.eq_ignore_ascii_case(&other.name)
    }

    /// The name a human would use for this source: the alias if set.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl std::fmt::Display for TableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} ({})", self.name, alias),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A column as reported by the metadata resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Declared type, if the backend reports one
    pub data_type: Option<String>,
    pub nullable: bool,
}

impl Column {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            nullable: true,
        }
    }

    pub fn with_type(mut self, data_type: &str) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// A reference to a named column of a table-like source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub owner: TableKey,
    pub name: String,
}

impl Field {
    pub fn new(owner: TableKey, name: &str) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.owner.display_name(), self.name)
    }
}

/// A physical table.
///
/// `columns` is `None` until the table has been resolved against a
/// connector. Unresolved tables accept any field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub alias: Option<String>,
    pub columns: Option<Vec<Column>>,
}

impl Table {
    /// An unresolved table, ready to be handed to a metadata resolver.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            alias: None,
            columns: None,
        }
    }

    /// A resolved table with a known column set.
    pub fn with_columns(name: &str, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            columns: Some(columns),
        }
    }

    /// A copy of this table with a caller alias, for attaching the same
    /// physical table more than once.
    pub fn aliased(&self, alias: &str) -> Self {
        Self {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }

    pub fn key(&self) -> TableKey {
        TableKey {
            name: self.name.clone(),
            alias: self.alias.clone(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.columns.is_some()
    }

    /// Look up a field by column name (case-insensitive).
    ///
    /// Returns the canonical column spelling on resolved tables.
    pub fn field(&self, name: &str) -> ModelResult<Field> {
        match &self.columns {
            None => Ok(Field::new(self.key(), name)),
            Some(columns) => columns
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
                .map(|c| Field::new(self.key(), &c.name))
                .ok_or_else(|| ModelError::FieldNotFound {
                    table: self.key().display_name().to_string(),
                    field: name.to_string(),
                }),
        }
    }

    /// All known fields. Empty for unresolved tables.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        let key = self.key();
        self.columns
            .iter()
            .flatten()
            .map(move |c| Field::new(key.clone(), &c.name))
    }

    /// Build a raw SQL expression anchored to this table.
    pub fn expression(&self, raw_sql: impl Into<String>) -> JoinExpression {
        JoinExpression::new(self.key(), raw_sql)
    }
}

/// A literal SQL fragment standing in for a column reference (or, as a join
/// target, for a whole relation).
///
/// The fragment is emitted byte-for-byte. Whatever aliases it mentions must
/// already be in scope at the join step where it is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoinExpression {
    pub anchor: TableKey,
    pub raw_sql: String,
}

impl JoinExpression {
    pub fn new(anchor: TableKey, raw_sql: impl Into<String>) -> Self {
        Self {
            anchor,
            raw_sql: raw_sql.into(),
        }
    }
}

/// Either a physical table or a raw SQL fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableLike {
    Table(Table),
    Expression(JoinExpression),
}

impl TableLike {
    /// `TableLike.newTable(name)`: an unresolved physical table.
    pub fn new_table(name: &str) -> Self {
        TableLike::Table(Table::new(name))
    }

    /// Identity of the source. Expressions are identified by their anchor.
    pub fn key(&self) -> TableKey {
        match self {
            TableLike::Table(t) => t.key(),
            TableLike::Expression(e) => e.anchor.clone(),
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            TableLike::Table(t) => Some(t),
            TableLike::Expression(_) => None,
        }
    }

    /// `filterByName`. Expressions have no columns to look up.
    pub fn field(&self, name: &str) -> ModelResult<Field> {
        match self {
            TableLike::Table(t) => t.field(name),
            TableLike::Expression(e) => Err(ModelError::FieldNotFound {
                table: e.raw_sql.clone(),
                field: name.to_string(),
            }),
        }
    }
}

impl From<Table> for TableLike {
    fn from(table: Table) -> Self {
        TableLike::Table(table)
    }
}

impl From<&Table> for TableLike {
    fn from(table: &Table) -> Self {
        TableLike::Table(table.clone())
    }
}

impl From<JoinExpression> for TableLike {
    fn from(expr: JoinExpression) -> Self {
        TableLike::Expression(expr)
    }
}
