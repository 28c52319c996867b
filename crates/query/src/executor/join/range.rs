//! Range (band) join: `left.value BETWEEN right.low AND right.high`.

use super::{combined_layout, joined_relation};
use crate::executor::{Relation, RelationEntry};
use alloc::vec::Vec;

/// Inner join matching a left value against an inclusive `[low, high]` interval
/// stored in two columns of each right row.
///
/// Intervals may overlap, in which case a left row joins every interval containing it.
/// NULL values and NULL bounds never match.
pub struct RangeJoin {
    /// Column of the left relation holding the probed value.
    value_index: usize,
    /// Column of the right relation holding the lower bound.
    low_index: usize,
    /// Column of the right relation holding the upper bound.
    high_index: usize,
}

impl RangeJoin {
    /// Creates a new range join.
    pub fn new(value_index: usize, low_index: usize, high_index: usize) -> Self {
        Self {
            value_index,
            low_index,
            high_index,
        }
    }

    /// Executes the range join.
    pub fn execute(&self, left: Relation, right: Relation) -> Relation {
        let (combined_tables, combined_column_counts) = combined_layout(&left, &right);

        // Right rows with a NULL bound never match
        let bands: Vec<&RelationEntry> = right
            .iter()
            .filter(|e| {
                let low = e.get_field(self.low_index);
                let high = e.get_field(self.high_index);
                matches!((low, high), (Some(l), Some(h)) if !l.is_null() && !h.is_null())
            })
            .collect();

        let mut result_entries = Vec::new();
        for left_entry in left.iter() {
            let Some(value) = left_entry.get_field(self.value_index).filter(|v| !v.is_null()) else {
                continue;
            };
            for band in &bands {
                let in_band = match (band.get_field(self.low_index), band.get_field(self.high_index)) {
                    (Some(low), Some(high)) => value >= low && value <= high,
                    _ => false,
                };
                if in_band {
                    result_entries.push(RelationEntry::combine(left_entry, band, combined_tables.clone()));
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
    use scott_core::{Row, Value};

    fn grades() -> Relation {
        let rows = vec![
            Row::new(1, vec![Value::Int64(1), Value::Int64(700), Value::Int64(1200)]),
            Row::new(2, vec![Value::Int64(2), Value::Int64(1201), Value::Int64(1400)]),
            Row::new(3, vec![Value::Int64(3), Value::Int64(1401), Value::Int64(2000)]),
        ];
        Relation::from_rows_owned(rows, "salgrade")
    }

    #[test]
    fn test_range_join_inclusive_bounds() {
        let rows = vec![
            Row::new(0, vec![Value::Int64(700)]),
            Row::new(1, vec![Value::Int64(1200)]),
            Row::new(2, vec![Value::Int64(1201)]),
            Row::new(3, vec![Value::Int64(1600)]),
        ];
        let emp = Relation::from_rows_owned(rows, "emp");

        let result = RangeJoin::new(0, 1, 2).execute(emp, grades());

        let grade_of: Vec<i64> = result.column_values(1).filter_map(Value::as_i64).collect();
        assert_eq!(grade_of, vec![1, 1, 2, 3]);
        assert_eq!(result.tables(), &["emp", "salgrade"]);
    }

    #[test]
    fn test_range_join_no_band_means_no_row() {
        let rows = vec![
            Row::new(0, vec![Value::Int64(100)]),
            Row::new(1, vec![Value::Null]),
            Row::new(2, vec![Value::Int64(9000)]),
        ];
        let emp = Relation::from_rows_owned(rows, "emp");

        let result = RangeJoin::new(0, 1, 2).execute(emp, grades());
        assert!(result.is_empty());
    }

    #[test]
    fn test_range_join_overlapping_bands() {
        let bands = vec![
            Row::new(1, vec![Value::Int64(1), Value::Int64(0), Value::Int64(10)]),
            Row::new(2, vec![Value::Int64(2), Value::Int64(5), Value::Int64(15)]),
            Row::new(3, vec![Value::Int64(3), Value::Null, Value::Int64(15)]),
        ];
        let right = Relation::from_rows_owned(bands, "band");
        let left = Relation::from_rows_owned(vec![Row::new(0, vec![Value::Int64(7)])], "v");

        let result = RangeJoin::new(0, 1, 2).execute(left, right);
        assert_eq!(result.len(), 2);
    }
}
