//! Alias assignment.
//!
//! Every position in a cube gets an alias derived from its place in the join
//! order: the fact is position 0, the n-th dimension is position n. Table
//! names never feed into aliases, so attaching the same table twice cannot
//! produce ambiguous references.

use serde::Serialize;

use crate::model::{Cube, TableKey, TableLike};

/// The alias used for a cube position.
pub fn alias_for(position: usize) -> String {
    format!("t{}", position)
}

/// One aliased physical table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    pub position: usize,
    pub alias: String,
    pub key: TableKey,
}

/// Aliases of every physical table in a cube, in join order.
///
/// Expression positions have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasMap {
    entries: Vec<AliasEntry>,
}

impl AliasMap {
    /// Assign aliases for every physical table of `cube`.
    pub fn assign(cube: &Cube) -> Self {
        let targets = std::iter::once(cube.fact())
            .chain(cube.dimensions().iter().map(|d| &d.target));

        let entries = targets
            .enumerate()
            .filter_map(|(position, target)| match target {
                TableLike::Table(table) => Some(AliasEntry {
                    position,
                    alias: alias_for(position),
                    key: table.key(),
                }),
                TableLike::Expression(_) => None,
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alias of the table attached at `position`.
    pub fn alias_at(&self, position: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.position == position)
            .map(|e| e.alias.as_str())
    }

    /// Alias of the most recent attachment of `key` anywhere in the cube.
    pub fn alias_of(&self, key: &TableKey) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key.matches(key))
            .map(|e| e.alias.as_str())
    }

    /// The attachment `key` refers to when seen from `position`: the latest
    /// one at or before that position. Names compare case-insensitively.
    pub fn resolve(&self, key: &TableKey, position: usize) -> Option<&AliasEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.position <= position)
            .find(|e| e.key.matches(key))
    }

    pub fn in_scope(&self, key: &TableKey, position: usize) -> bool {
        self.resolve(key, position).is_some()
    }
}
