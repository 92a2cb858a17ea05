//! Declarative cube definitions.
//!
//! A cube can be written down as TOML and resolved against a connector:
//!
//! ```toml
//! name = "demoCube"
//! fact = "BANK_VOUCHER"
//!
//! [[dimensions]]
//! join = "left"
//! table = "ACCOUNT"
//! left = { field = "BANK_VOUCHER.ACCOUNT_NO" }
//! right = { field = "ACCOUNT.ACCOUNT_NO" }
//! comparator = ">"
//!
//! [[dimensions]]
//! join = "inner"
//! table = "ACCOUNT"
//! alias = "parent"
//! left = { expr = "t1.PARENT_NO", anchor = "ACCOUNT" }
//! right = { field = "parent.ACCOUNT_NO" }
//! ```
//!
//! Field references are `<table-or-alias>.<column>`. They may name any
//! table declared in the file, including one attached later; the translator
//! reports such references instead of rejecting them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::metadata::{MetadataError, MetadataResolver};
use crate::model::{
    Comparator, Condition, Cube, JoinExpression, JoinType, ModelError, Operand, Table,
};

/// Errors that can occur loading or resolving a cube definition.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("Failed to read cube definition: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse cube definition: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown join type '{0}', expected 'inner' or 'left'")]
    UnknownJoinType(String),

    #[error("Unknown table reference '{0}'")]
    UnknownTable(String),

    #[error("Malformed field reference '{0}', expected <table>.<column>")]
    MalformedFieldRef(String),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// A cube as written in a definition file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CubeDefinition {
    pub name: String,
    pub fact: String,
    #[serde(default)]
    pub fact_alias: Option<String>,
    #[serde(default)]
    pub dimensions: Vec<DimensionDefinition>,
}

/// One `[[dimensions]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DimensionDefinition {
    pub join: String,
    pub table: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub left: OperandDefinition,
    pub right: OperandDefinition,
    #[serde(default)]
    pub comparator: Option<String>,
}

/// A condition operand: a field reference or a raw expression.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OperandDefinition {
    Field {
        field: String,
    },
    Expression {
        expr: String,
        /// Table the expression belongs to; defaults to the fact
        #[serde(default)]
        anchor: Option<String>,
    },
}

impl CubeDefinition {
    /// Parse a definition from TOML text.
    pub fn from_toml(source: &str) -> DefinitionResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a definition file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> DefinitionResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Resolve every table through `resolver` and build the cube.
    ///
    /// Each physical table is resolved once, however many times it is
    /// attached.
    pub async fn resolve(&self, resolver: &dyn MetadataResolver) -> DefinitionResult<Cube> {
        let mut resolved: HashMap<String, Table> = HashMap::new();

        let mut declared = Vec::with_capacity(self.dimensions.len() + 1);
        declared.push(
            resolve_once(resolver, &mut resolved, &self.fact, self.fact_alias.as_deref()).await?,
        );
        for dimension in &self.dimensions {
            declared.push(
                resolve_once(
                    resolver,
                    &mut resolved,
                    &dimension.table,
                    dimension.alias.as_deref(),
                )
                .await?,
            );
        }

        let tables = DeclaredTables { tables: &declared };
        let mut cube = Cube::new(&self.name, &declared[0]);

        for (dimension, target) in self.dimensions.iter().zip(&declared[1..]) {
            let join_type = JoinType::from_str(&dimension.join)
                .ok_or_else(|| DefinitionError::UnknownJoinType(dimension.join.clone()))?;
            let comparator = dimension
                .comparator
                .as_deref()
                .map(Comparator::parse)
                .unwrap_or_default();

            let condition = Condition::with_comparator(
                tables.operand(&dimension.left)?,
                tables.operand(&dimension.right)?,
                comparator,
            );
            cube.add_dimension(join_type, target, condition);
        }

        debug!(
            "resolved cube '{}' with {} dimension(s) using connector '{}'",
            self.name,
            cube.dimensions().len(),
            resolver.connector().name
        );
        Ok(cube)
    }
}

async fn resolve_once(
    resolver: &dyn MetadataResolver,
    resolved: &mut HashMap<String, Table>,
    name: &str,
    alias: Option<&str>,
) -> DefinitionResult<Table> {
    let key = name.to_ascii_lowercase();
    let table = match resolved.get(&key) {
        Some(table) => table.clone(),
        None => {
            let table = resolver.resolve_table(Table::new(name)).await?;
            resolved.insert(key, table.clone());
            table
        }
    };

    Ok(match alias {
        Some(alias) => table.aliased(alias),
        None => table,
    })
}

/// Tables declared by a definition, in declaration order.
struct DeclaredTables<'a> {
    tables: &'a [Table],
}

impl DeclaredTables<'_> {
    /// Find a table by alias, then by name (unaliased copies first).
    fn lookup(&self, reference: &str) -> DefinitionResult<&Table> {
        let by_alias = self.tables.iter().find(|t| {
            t.alias
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(reference))
        });
        let by_name = || {
            self.tables
                .iter()
                .find(|t| t.alias.is_none() && t.name.eq_ignore_ascii_case(reference))
                .or_else(|| {
                    self.tables
                        .iter()
                        .find(|t| t.name.eq_ignore_ascii_case(reference))
                })
        };

        by_alias
            .or_else(by_name)
            .ok_or_else(|| DefinitionError::UnknownTable(reference.to_string()))
    }

    fn operand(&self, definition: &OperandDefinition) -> DefinitionResult<Operand> {
        match definition {
            OperandDefinition::Field { field } => {
                let (table, column) = field
                    .rsplit_once('.')
                    .filter(|(t, c)| !t.is_empty() && !c.is_empty())
                    .ok_or_else(|| DefinitionError::MalformedFieldRef(field.clone()))?;
                Ok(Operand::Field(self.lookup(table)?.field(column)?))
            }
            OperandDefinition::Expression { expr, anchor } => {
                let anchor = match anchor {
                    Some(reference) => self.lookup(reference)?,
                    None => &self.tables[0],
                };
                Ok(Operand::Expression(JoinExpression::new(
                    anchor.key(),
                    expr.clone(),
                )))
            }
        }
    }
}
