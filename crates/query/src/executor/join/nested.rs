//! Nested Loop Join implementation.

use super::{combined_layout, joined_relation};
use crate::executor::{Relation, RelationEntry};
use alloc::vec::Vec;
use scott_core::Value;

/// Nested Loop Join executor.
///
/// The simplest join algorithm that compares every pair of rows.
/// Best for small relations or non-equi joins. Inner join only.
pub struct NestedLoopJoin {
    /// Column index for the left relation.
    left_key_index: usize,
    /// Column index for the right relation.
    right_key_index: usize,
}

impl NestedLoopJoin {
    /// Creates an inner nested loop join.
    pub fn inner(left_key_index: usize, right_key_index: usize) -> Self {
        Self {
            left_key_index,
            right_key_index,
        }
    }

    /// Executes the nested loop join with equality comparison.
    pub fn execute(&self, left: Relation, right: Relation) -> Relation {
        self.execute_with_predicate(left, right, |l, r| l == r)
    }

    /// Executes the nested loop join with a custom predicate on the two key values.
    ///
    /// NULL keys on either side never match.
    pub fn execute_with_predicate<F>(&self, left: Relation, right: Relation, predicate: F) -> Relation
    where
        F: Fn(&Value, &Value) -> bool,
    {
        let (combined_tables, combined_column_counts) = combined_layout(&left, &right);
        let mut result_entries = Vec::new();

        for left_entry in left.iter() {
            let Some(left_val) = left_entry
                .get_field(self.left_key_index)
                .filter(|v| !v.is_null())
            else {
                continue;
            };

            for right_entry in right.iter() {
                let Some(right_val) = right_entry.get_field(self.right_key_index) else {
                    continue;
                };
                if !right_val.is_null() && predicate(left_val, right_val) {
                    result_entries.push(RelationEntry::combine(
                        left_entry,
                        right_entry,
                        combined_tables.clone(),
                    ));
                }
            }
        }

        joined_relation(result_entries, combined_tables, combined_column_counts)
    }
}
