//! Hash Join implementation.

use super::{combined_layout, joined_relation};
use crate::executor::{Relation, RelationEntry};
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};
use hashbrown::HashMap;
use scott_core::Value;

/// A wrapper around Value reference that implements Hash and Eq for use as HashMap key.
/// This avoids cloning Value during hash table operations.
#[derive(Clone, Copy)]
struct ValueRef<'a>(&'a Value);

impl Hash for ValueRef<'_> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialEq for ValueRef<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for ValueRef<'_> {}

/// Hash Join executor.
///
/// Implements the classic hash join algorithm:
/// 1. Build phase: Create a hash table from the right relation
/// 2. Probe phase: Scan the left relation in order and probe the hash table
///
/// Inner join only; NULL keys never match.
pub struct HashJoin {
    /// Column index for the left (probe) relation.
    left_key_index: usize,
    /// Column index for the right (build) relation.
    right_key_index: usize,
}

impl HashJoin {
    /// Creates an inner hash join.
    pub fn inner(left_key_index: usize, right_key_index: usize) -> Self {
        Self {
            left_key_index,
            right_key_index,
        }
    }

    /// Executes the hash join.
    ///
    /// `left` and `right` may be scans of the same table (a self-join); the build
    /// side only borrows `right`, so the two inputs never share a cursor.
    pub fn execute(&self, left: Relation, right: Relation) -> Relation {
        // Build phase: map key values to right entry indices, in right order
        let mut hash_table: HashMap<ValueRef<'_>, Vec<usize>> = HashMap::with_capacity(right.len());

        for (idx, entry) in right.entries.iter().enumerate() {
            if let Some(key_value) = entry.get_field(self.right_key_index) {
                if !key_value.is_null() {
                    hash_table
                        .entry(ValueRef(key_value))
                        .or_default()
                        .push(idx);
                }
            }
        }

        let (combined_tables, combined_column_counts) = combined_layout(&left, &right);
        let mut result_entries = Vec::with_capacity(left.len());

        // Probe phase
        for probe_entry in left.entries.iter() {
            let matches = probe_entry
                .get_field(self.left_key_index)
                .filter(|kv| !kv.is_null())
                .and_then(|kv| hash_table.get(&ValueRef(kv)));

            if let Some(build_indices) = matches {
                for &build_idx in build_indices {
                    result_entries.push(RelationEntry::combine(
                        probe_entry,
                        &right.entries[build_idx],
                        combined_tables.clone(),
                    ));
                }
            }
        }

        joined_relation(result_entries, combined_tables, combined_column_counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use scott_core::Row;

    #[test]
    fn test_hash_join_inner() {
        let left_rows = vec![
            Row::new(0, vec![Value::Int64(1), Value::String("A".into())]),
            Row::new(1, vec![Value::Int64(2), Value::String("B".into())]),
            Row::new(2, vec![Value::Int64(3), Value::String("C".into())]),
        ];
        let right_rows = vec![
            Row::new(10, vec![Value::Int64(1), Value::String("X".into())]),
            Row::new(11, vec![Value::Int64(2), Value::String("Y".into())]),
            Row::new(12, vec![Value::Int64(4), Value::String("Z".into())]),
        ];

        let left = Relation::from_rows_owned(left_rows, "left");
        let right = Relation::from_rows_owned(right_rows, "right");

        let join = HashJoin::inner(0, 0);
        let result = join.execute(left, right);

        // Should match on keys 1 and 2
        assert_eq!(result.len(), 2);
        assert_eq!(result.tables(), &["left", "right"]);
        assert_eq!(result.get_table_offset("right"), Some(2));
        assert_eq!(result.entries[0].get_field(3), Some(&Value::String("X".into())));
    }

    #[test]
    fn test_hash_join_preserves_left_order() {
        let left_rows = vec![
            Row::new(0, vec![Value::Int64(30)]),
            Row::new(1, vec![Value::Int64(10)]),
            Row::new(2, vec![Value::Int64(30)]),
        ];
        let right_rows = vec![
            Row::new(10, vec![Value::Int64(10)]),
            Row::new(30, vec![Value::Int64(30)]),
        ];

        let left = Relation::from_rows_owned(left_rows, "emp");
        let right = Relation::from_rows_owned(right_rows, "dept");
        let result = HashJoin::inner(0, 0).execute(left, right);

        let keys: Vec<i64> = result.column_values(0).filter_map(Value::as_i64).collect();
        assert_eq!(keys, vec![30, 10, 30]);
    }

    #[test]
    fn test_hash_self_join() {
        // (empno, mgr)
        let rows = vec![
            Row::new(7839, vec![Value::Int64(7839), Value::Null]),
            Row::new(7566, vec![Value::Int64(7566), Value::Int64(7839)]),
            Row::new(7902, vec![Value::Int64(7902), Value::Int64(7566)]),
        ];
        let emp = Relation::from_rows_owned(rows, "emp");
        let mut mgr = emp.clone();
        mgr.tables = vec!["mgr".into()];

        let result = HashJoin::inner(1, 0).execute(emp, mgr);

        assert_eq!(result.len(), 2);
        assert_eq!(result.tables(), &["emp", "mgr"]);
        assert_eq!(result.entries[1].get_field(0), Some(&Value::Int64(7902)));
        assert_eq!(result.entries[1].get_field(2), Some(&Value::Int64(7566)));
    }

    #[test]
    fn test_hash_join_matches_integral_float_keys() {
        let left = Relation::from_rows_owned(vec![Row::new(0, vec![Value::Int64(30)])], "emp");
        let right = Relation::from_rows_owned(
            vec![
                Row::new(10, vec![Value::Float64(30.0)]),
                Row::new(11, vec![Value::Float64(30.5)]),
            ],
            "dept",
        );

        let result = HashJoin::inner(0, 0).execute(left, right);

        assert_eq!(result.len(), 1);
        assert_eq!(result.entries[0].get_field(1), Some(&Value::Float64(30.0)));
    }

    #[test]
    fn test_hash_join_with_nulls() {
        let left_rows = vec![
            Row::new(0, vec![Value::Int64(1)]),
            Row::new(1, vec![Value::Null]),
        ];
        let right_rows = vec![
            Row::new(10, vec![Value::Int64(1)]),
            Row::new(11, vec![Value::Null]),
        ];

        let left = Relation::from_rows_owned(left_rows, "left");
        let right = Relation::from_rows_owned(right_rows, "right");

        let join = HashJoin::inner(0, 0);
        let result = join.execute(left, right);

        // NULL values should not match
        assert_eq!(result.len(), 1);
    }
}
