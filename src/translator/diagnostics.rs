//! Scope diagnostics.
//!
//! A condition may reference a table that is not joined yet (or never is).
//! Translation still succeeds; the emitted SQL will either fail at the
//! database or silently match nothing. Each such reference is reported here
//! so callers can decide what to do with it.

use serde::Serialize;

use crate::model::{Field, TableKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScopeDiagnostic {
    /// A field operand whose owner is not attached at or before this step.
    /// It was rendered with the owner's own name instead of an alias.
    FieldOutOfScope { position: usize, field: Field },
    /// A raw expression anchored to a table that is not in scope yet.
    AnchorOutOfScope { position: usize, anchor: TableKey },
}

impl ScopeDiagnostic {
    pub fn position(&self) -> usize {
        match self {
            ScopeDiagnostic::FieldOutOfScope { position, .. }
            | ScopeDiagnostic::AnchorOutOfScope { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for ScopeDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeDiagnostic::FieldOutOfScope { position, field } => write!(
                f,
                "dimension {} references field {} whose table is not in scope",
                position, field
            ),
            ScopeDiagnostic::AnchorOutOfScope { position, anchor } => write!(
                f,
                "dimension {} uses an expression anchored to {} which is not in scope",
                position, anchor
            ),
        }
    }
}
