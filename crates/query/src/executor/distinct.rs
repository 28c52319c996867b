//! Distinct executor.

use crate::executor::{Relation, RelationEntry};
use alloc::vec::Vec;
use hashbrown::HashSet;
use scott_core::Value;

/// Distinct executor - drops rows whose key columns repeat an earlier row.
///
/// The first row carrying each key survives, so output keeps first-occurrence order.
/// NULL keys compare equal to each other, as in `SELECT DISTINCT`.
pub struct DistinctExecutor {
    /// Key column indices; empty means the whole row.
    columns: Vec<usize>,
}

impl DistinctExecutor {
    /// Creates a distinct executor over the given key columns.
    pub fn new(columns: Vec<usize>) -> Self {
        Self { columns }
    }

    /// Creates a distinct executor comparing whole rows.
    pub fn whole_row() -> Self {
        Self::new(Vec::new())
    }

    /// Executes the deduplication on the input relation.
    pub fn execute(&self, input: Relation) -> Relation {
        let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(input.len());
        let entries: Vec<RelationEntry> = input
            .iter()
            .filter(|entry| seen.insert(self.key(entry)))
            .cloned()
            .collect();

        input.with_entries(entries)
    }

    fn key(&self, entry: &RelationEntry) -> Vec<Value> {
        if self.columns.is_empty() {
            return entry.row.values().to_vec();
        }
        self.columns
            .iter()
            .map(|&idx| entry.get_field(idx).cloned().unwrap_or(Value::Null))
            .collect()
    }
}
