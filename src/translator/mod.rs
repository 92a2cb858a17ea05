//! Cube to SQL translation.
//!
//! The translator walks a cube's dimensions in attachment order and emits one
//! JOIN clause per dimension:
//!
//! ```text
//! SELECT
//!   t0.*
//! FROM BANK_VOUCHER AS t0
//! LEFT JOIN ACCOUNT AS t1 ON t0.ACCOUNT_NO = t1.ACCOUNT_NO
//! INNER JOIN CUST_BASIC_INFO AS t2 ON t1.CUS_ID = t2.CUS_ID
//! ```
//!
//! # Scope
//!
//! A field operand is qualified with the alias of the latest attachment of
//! its table at or before the current join step. Raw expressions are emitted
//! verbatim and are never inspected. A reference to a table that is not in
//! scope does not fail translation: it is rendered with the table's own name
//! and reported as a [`ScopeDiagnostic`]. Such SQL either fails at the
//! database or matches no rows.
//!
//! Every physical table is emitted under its positional alias, so a raw
//! expression must use that alias too. Text such as
//! `concat(BANK_VOUCHER.ACCOUNT_NO,'1')` is not inspected and produces no
//! diagnostic, but the database rejects it (`no such column`) because
//! `BANK_VOUCHER` is only visible as `t0`. Write `t0.ACCOUNT_NO` instead.
//!
//! # Example
//!
//! ```
//! use mipha::model::{Column, Condition, Cube, Table};
//! use mipha::translator::SqlTranslator;
//!
//! let voucher = Table::with_columns("BANK_VOUCHER", vec![Column::new("ACCOUNT_NO")]);
//! let account = Table::with_columns("ACCOUNT", vec![Column::new("ACCOUNT_NO")]);
//!
//! let cube = Cube::builder("demoCube", &voucher)
//!     .left_join(
//!         &account,
//!         Condition::new(
//!             voucher.field("ACCOUNT_NO").unwrap(),
//!             account.field("ACCOUNT_NO").unwrap(),
//!         ),
//!     )
//!     .build();
//!
//! let sql = SqlTranslator::new().translate(&cube).unwrap();
//! assert!(sql.ends_with("LEFT JOIN ACCOUNT AS t1 ON t0.ACCOUNT_NO = t1.ACCOUNT_NO"));
//! ```

mod alias;
mod diagnostics;
mod error;

pub use alias::{alias_for, AliasEntry, AliasMap};
pub use diagnostics::ScopeDiagnostic;
pub use error::{TranslateError, TranslateResult};

use log::{debug, warn};

use crate::model::{Comparator, Condition, Cube, JoinType, Operand, TableLike};
use crate::sql::{table_col, BinaryOperator, Expr, JoinKind, Query, Relation, TableRef};

/// Output of [`SqlTranslator::translate_with_aliases`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// The generated SQL string.
    pub sql: String,

    /// The SQL query AST the string was rendered from.
    pub query: Query,

    /// Alias assigned to each physical table.
    pub aliases: AliasMap,

    /// References that were out of scope at their join step.
    pub diagnostics: Vec<ScopeDiagnostic>,
}

impl Translation {
    /// True when every reference was in scope.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Translates cubes to ANSI join SQL.
///
/// Holds no state; one instance can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlTranslator;

impl SqlTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Translate a cube to SQL text.
    pub fn translate(&self, cube: &Cube) -> TranslateResult<String> {
        self.translate_with_aliases(cube).map(|t| t.sql)
    }

    /// Translate a cube and also return the alias map and scope diagnostics.
    pub fn translate_with_aliases(&self, cube: &Cube) -> TranslateResult<Translation> {
        debug!(
            "translating cube '{}' with {} dimension(s)",
            cube.name(),
            cube.dimensions().len()
        );

        let aliases = AliasMap::assign(cube);
        let mut diagnostics = Vec::new();

        let mut query = match cube.fact() {
            TableLike::Table(table) => {
                let alias = alias_for(0);
                Query::new()
                    .select_table_star(&alias)
                    .from(TableRef::new(&table.name).with_alias(&alias))
            }
            TableLike::Expression(expr) => Query::new()
                .select_star()
                .from(Relation::Raw(expr.raw_sql.clone())),
        };

        for (index, dimension) in cube.dimensions().iter().enumerate() {
            let position = index + 1;
            let on = condition_expr(&dimension.condition, position, &aliases, &mut diagnostics)?;
            query = query.join(
                join_kind(dimension.join_type),
                relation_for(&dimension.target, position),
                on,
            );
        }

        for diagnostic in &diagnostics {
            warn!("cube '{}': {}", cube.name(), diagnostic);
        }

        let sql = query.to_sql();
        debug!("cube '{}' translated:\n{}", cube.name(), sql);

        Ok(Translation {
            sql,
            query,
            aliases,
            diagnostics,
        })
    }
}

fn join_kind(join_type: JoinType) -> JoinKind {
    match join_type {
        JoinType::Inner => JoinKind::Inner,
        JoinType::Left => JoinKind::Left,
    }
}

fn relation_for(target: &TableLike, position: usize) -> Relation {
    match target {
        TableLike::Table(table) => {
            Relation::Table(TableRef::new(&table.name).with_alias(&alias_for(position)))
        }
        TableLike::Expression(expr) => Relation::Raw(expr.raw_sql.clone()),
    }
}

fn comparator_operator(comparator: &Comparator) -> Option<BinaryOperator> {
    match comparator {
        Comparator::Equals => Some(BinaryOperator::Eq),
        Comparator::NotEquals => Some(BinaryOperator::Ne),
        Comparator::Greater => Some(BinaryOperator::Gt),
        Comparator::GreaterOrEquals => Some(BinaryOperator::Gte),
        Comparator::Less => Some(BinaryOperator::Lt),
        Comparator::LessOrEquals => Some(BinaryOperator::Lte),
        Comparator::Like => Some(BinaryOperator::Like),
        Comparator::NotLike => Some(BinaryOperator::NotLike),
        Comparator::Unsupported(_) => None,
    }
}

fn condition_expr(
    condition: &Condition,
    position: usize,
    aliases: &AliasMap,
    diagnostics: &mut Vec<ScopeDiagnostic>,
) -> TranslateResult<Expr> {
    let op = comparator_operator(&condition.comparator).ok_or_else(|| {
        TranslateError::UnsupportedComparator {
            comparator: condition.comparator.to_string(),
            position,
        }
    })?;

    let left = operand_expr(&condition.left, position, aliases, diagnostics);
    let right = operand_expr(&condition.right, position, aliases, diagnostics);

    Ok(Expr::binary(left, op, right))
}

fn operand_expr(
    operand: &Operand,
    position: usize,
    aliases: &AliasMap,
    diagnostics: &mut Vec<ScopeDiagnostic>,
) -> Expr {
    match operand {
        Operand::Field(field) => match aliases.resolve(&field.owner, position) {
            Some(entry) => table_col(&entry.alias, &field.name),
            None => {
                diagnostics.push(ScopeDiagnostic::FieldOutOfScope {
                    position,
                    field: field.clone(),
                });
                table_col(field.owner.display_name(), &field.name)
            }
        },
        Operand::Expression(expr) => {
            if !aliases.in_scope(&expr.anchor, position) {
                diagnostics.push(ScopeDiagnostic::AnchorOutOfScope {
                    position,
                    anchor: expr.anchor.clone(),
                });
            }
            Expr::Raw(expr.raw_sql.clone())
        }
    }
}
