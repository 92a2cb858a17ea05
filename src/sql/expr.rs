//! Expression AST for join predicates.

use super::token::{Token, TokenStream};

/// Comparison operators usable in an ON clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    Like,
    NotLike,
}

impl BinaryOperator {
    fn push_tokens(self, ts: &mut TokenStream) {
        match self {
            BinaryOperator::Eq => ts.push(Token::Eq),
            BinaryOperator::Ne => ts.push(Token::Ne),
            BinaryOperator::Lt => ts.push(Token::Lt),
            BinaryOperator::Gt => ts.push(Token::Gt),
            BinaryOperator::Lte => ts.push(Token::Lte),
            BinaryOperator::Gte => ts.push(Token::Gte),
            BinaryOperator::Like => ts.push(Token::Like),
            BinaryOperator::NotLike => ts.push(Token::Not).space().push(Token::Like),
        };
    }
}

/// A SQL expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Column reference, optionally qualified by a table alias
    Column {
        table: Option<String>,
        column: String,
    },
    /// Caller-supplied SQL, emitted verbatim
    Raw(String),
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        match self {
            Expr::Column { table, column } => {
                if let Some(t) = table {
                    ts.push(Token::Ident(t.clone()));
                    ts.push(Token::Dot);
                }
                ts.push(Token::Ident(column.clone()));
            }
            Expr::Raw(sql) => {
                ts.push(Token::Raw(sql.clone()));
            }
            Expr::BinaryOp { left, op, right } => {
                ts.append(&left.to_tokens());
                ts.space();
                op.push_tokens(&mut ts);
                ts.space();
                ts.append(&right.to_tokens());
            }
        }

        ts
    }
}

/// Create a column reference qualified by a table alias.
pub fn table_col(table: &str, column: &str) -> Expr {
    Expr::Column {
        table: Some(table.into()),
        column: column.into(),
    }
}

/// Create a raw SQL expression.
pub fn raw(sql: &str) -> Expr {
    Expr::Raw(sql.into())
}
