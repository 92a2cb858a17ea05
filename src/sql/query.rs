//! Query builder - construct SELECT ... FROM ... JOIN queries with a fluent API.

use super::expr::Expr;
use super::token::{Token, TokenStream};

// =============================================================================
// Select Expression
// =============================================================================

/// The SELECT list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectExpr {
    /// `*`
    #[default]
    Star,
    /// `<table>.*`
    TableStar(String),
}

impl SelectExpr {
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        match self {
            SelectExpr::Star => {
                ts.push(Token::Star);
            }
            SelectExpr::TableStar(table) => {
                ts.push(Token::Ident(table.clone()))
                    .push(Token::Dot)
                    .push(Token::Star);
            }
        }
        ts
    }
}

// =============================================================================
// Table Reference
// =============================================================================

/// A table reference with optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "builders have no effect until used"]
pub struct TableRef {
    pub table: String,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Ident(self.table.clone()));
        if let Some(alias) = &self.alias {
            ts.space()
                .push(Token::As)
                .space()
                .push(Token::Ident(alias.clone()));
        }
        ts
    }
}

/// Something that can appear after FROM or JOIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    Table(TableRef),
    /// Caller-supplied relation SQL, emitted verbatim
    Raw(String),
}

impl Relation {
    pub fn to_tokens(&self) -> TokenStream {
        match self {
            Relation::Table(table) => table.to_tokens(),
            Relation::Raw(sql) => {
                let mut ts = TokenStream::new();
                ts.push(Token::Raw(sql.clone()));
                ts
            }
        }
    }
}

impl From<TableRef> for Relation {
    fn from(table: TableRef) -> Self {
        Relation::Table(table)
    }
}

// =============================================================================
// Joins
// =============================================================================

/// Type of join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinKind,
    pub relation: Relation,
    pub on: Expr,
}

impl Join {
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        match self.kind {
            JoinKind::Inner => ts.push(Token::Inner),
            JoinKind::Left => ts.push(Token::Left),
        };

        ts.space().push(Token::Join).space();
        ts.append(&self.relation.to_tokens());
        ts.space().push(Token::On).space();
        ts.append(&self.on.to_tokens());

        ts
    }
}

// =============================================================================
// Query Builder
// =============================================================================

/// A SELECT query over a single relation and a chain of joins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "Query has no effect until converted to SQL with to_sql() or to_tokens()"]
pub struct Query {
    pub select: SelectExpr,
    pub from: Option<Relation>,
    pub joins: Vec<Join>,
}

impl Query {
    /// Create a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// SELECT *
    pub fn select_star(mut self) -> Self {
        self.select = SelectExpr::Star;
        self
    }

    /// SELECT <table>.*
    pub fn select_table_star(mut self, table: &str) -> Self {
        self.select = SelectExpr::TableStar(table.into());
        self
    }

    /// Set the FROM relation.
    pub fn from(mut self, relation: impl Into<Relation>) -> Self {
        self.from = Some(relation.into());
        self
    }

    /// Add a JOIN.
    pub fn join(mut self, kind: JoinKind, relation: impl Into<Relation>, on: Expr) -> Self {
        self.joins.push(Join {
            kind,
            relation: relation.into(),
            on,
        });
        self
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        // SELECT
        ts.push(Token::Select).newline().indent(1);
        ts.append(&self.select.to_tokens());

        // FROM
        if let Some(from) = &self.from {
            ts.newline().push(Token::From).space();
            ts.append(&from.to_tokens());
        }

        // JOINs
        for join in &self.joins {
            ts.newline();
            ts.append(&join.to_tokens());
        }

        ts
    }

    /// Generate the SQL string.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

// =============================================================================
// Tests
// =============================================================================
