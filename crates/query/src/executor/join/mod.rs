//! JOIN algorithm implementations.
//!
//! Every join emits the left row's columns followed by the right row's columns, and
//! walks the left input in order so results follow the left relation's row order.

mod hash;
mod nested;
mod range;

pub use hash::HashJoin;
pub use nested::NestedLoopJoin;
pub use range::RangeJoin;

use crate::executor::{Relation, RelationEntry, SharedTables};
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Table names and per-table column counts of `left` followed by `right`.
fn combined_layout(left: &Relation, right: &Relation) -> (SharedTables, Vec<usize>) {
    let mut tables = left.tables.clone();
    tables.extend(right.tables.iter().cloned());

    let mut counts = left.table_column_counts.clone();
    counts.extend(right.table_column_counts.iter().copied());

    (Arc::from(tables), counts)
}

/// Assembles the output relation of a join.
fn joined_relation(
    entries: Vec<RelationEntry>,
    tables: SharedTables,
    table_column_counts: Vec<usize>,
) -> Relation {
    Relation {
        entries,
        tables: tables.to_vec(),
        table_column_counts,
    }
}
