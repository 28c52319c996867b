//! Property-based tests for the relational operators.
//!
//! These tests check that the join algorithms agree with each other and with a
//! brute-force evaluation, and that sort and distinct keep input order where
//! they promise to.

use proptest::prelude::*;
use scott_core::{Row, Value};
use scott_query::ast::SortOrder;
use scott_query::executor::join::{HashJoin, NestedLoopJoin, RangeJoin};
use scott_query::executor::{DistinctExecutor, Relation, SortExecutor};

/// Strategy for generating random i64 values within a reasonable range.
fn value_strategy() -> impl Strategy<Value = i64> {
    -100i64..100i64
}

/// Strategy for generating a single key column, sometimes NULL.
fn nullable_strategy() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![
        1 => Just(None),
        6 => value_strategy().prop_map(Some),
    ]
}

/// Strategy for generating a vector of rows with a single nullable key column.
fn rows_strategy(max_rows: usize) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(nullable_strategy(), 0..max_rows).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Row::new(i as u64, vec![Value::from(v)]))
            .collect()
    })
}

/// Strategy for generating (key, payload) rows with few distinct keys.
fn keyed_rows_strategy(max_rows: usize) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0i64..5, value_strategy()), 0..max_rows).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, (k, v))| Row::new(i as u64, vec![Value::Int64(k), Value::Int64(v)]))
            .collect()
    })
}

/// Strategy for generating (low, high) bands; bands may overlap or be empty.
fn band_rows_strategy(max_rows: usize) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((value_strategy(), 0i64..50), 0..max_rows).prop_map(|bands| {
        bands
            .into_iter()
            .enumerate()
            .map(|(i, (low, width))| {
                Row::new(
                    i as u64,
                    vec![Value::Int64(i as i64), Value::Int64(low), Value::Int64(low + width)],
                )
            })
            .collect()
    })
}

/// Extracts the (left_id, right_id) pairs of a join result, in output order.
fn id_pairs(result: &Relation) -> Vec<(Value, Value)> {
    result
        .iter()
        .map(|e| {
            let left = e.get_field(0).cloned().unwrap_or(Value::Null);
            let right = e.get_field(1).cloned().unwrap_or(Value::Null);
            (left, right)
        })
        .collect()
}

proptest! {
    /// Hash join and nested loop join produce the same rows in the same order.
    #[test]
    fn hash_join_equals_nested_loop_join(
        left_rows in rows_strategy(40),
        right_rows in rows_strategy(40),
    ) {
        let left = Relation::from_rows_owned(left_rows, "left");
        let right = Relation::from_rows_owned(right_rows, "right");

        let hash_result = HashJoin::inner(0, 0).execute(left.clone(), right.clone());
        let nested_result = NestedLoopJoin::inner(0, 0).execute(left, right);

        prop_assert_eq!(id_pairs(&hash_result), id_pairs(&nested_result));
    }

    /// Inner join result count equals the number of non-null matching pairs.
    #[test]
    fn inner_join_count_correct(
        left_rows in rows_strategy(30),
        right_rows in rows_strategy(30),
    ) {
        let mut expected_count = 0;
        for l in &left_rows {
            for r in &right_rows {
                let (lk, rk) = (l.get(0).and_then(Value::as_i64), r.get(0).and_then(Value::as_i64));
                if lk.is_some() && lk == rk {
                    expected_count += 1;
                }
            }
        }

        let left = Relation::from_rows_owned(left_rows, "left");
        let right = Relation::from_rows_owned(right_rows, "right");
        let result = HashJoin::inner(0, 0).execute(left, right);

        prop_assert_eq!(result.len(), expected_count);
    }

    /// Hash join emits matches in left order, then right order within one left row.
    #[test]
    fn hash_join_follows_left_then_right_order(
        left_rows in keyed_rows_strategy(30),
        right_rows in keyed_rows_strategy(30),
    ) {
        let mut expected = Vec::new();
        for l in &left_rows {
            for r in &right_rows {
                if l.get(0) == r.get(0) {
                    expected.push((l.get(1).cloned(), r.get(1).cloned()));
                }
            }
        }

        let left = Relation::from_rows_owned(left_rows, "left");
        let right = Relation::from_rows_owned(right_rows, "right");
        let result = HashJoin::inner(0, 0).execute(left, right);

        let actual: Vec<(Option<Value>, Option<Value>)> = result
            .iter()
            .map(|e| (e.get_field(1).cloned(), e.get_field(3).cloned()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Nested loop join with a custom predicate matches brute force.
    #[test]
    fn nested_loop_theta_join(
        left_rows in rows_strategy(20),
        right_rows in rows_strategy(20),
    ) {
        let mut expected_count = 0;
        for l in &left_rows {
            for r in &right_rows {
                if let (Some(lk), Some(rk)) = (l.get(0).and_then(Value::as_i64), r.get(0).and_then(Value::as_i64)) {
                    if lk < rk {
                        expected_count += 1;
                    }
                }
            }
        }

        let left = Relation::from_rows_owned(left_rows, "left");
        let right = Relation::from_rows_owned(right_rows, "right");
        let result = NestedLoopJoin::inner(0, 0)
            .execute_with_predicate(left, right, |a, b| !a.is_null() && !b.is_null() && a < b);

        prop_assert_eq!(result.len(), expected_count);
    }

    /// Range join pairs each value with every band containing it, bounds inclusive.
    #[test]
    fn range_join_equals_brute_force(
        value_rows in rows_strategy(30),
        band_rows in band_rows_strategy(10),
    ) {
        let mut expected = Vec::new();
        for v in &value_rows {
            for b in &band_rows {
                let value = v.get(0).and_then(Value::as_i64);
                let low = b.get(1).and_then(Value::as_i64);
                let high = b.get(2).and_then(Value::as_i64);
                if let (Some(value), Some(low), Some(high)) = (value, low, high) {
                    if low <= value && value <= high {
                        expected.push((Value::Int64(value), b.get(0).cloned().unwrap_or(Value::Null)));
                    }
                }
            }
        }

        let values = Relation::from_rows_owned(value_rows, "emp");
        let bands = Relation::from_rows_owned(band_rows, "salgrade");
        let result = RangeJoin::new(0, 1, 2).execute(values, bands);

        prop_assert_eq!(id_pairs(&result), expected);
    }

    /// Sorting is stable: rows with equal keys keep their input order.
    #[test]
    fn sort_is_stable(rows in keyed_rows_strategy(50), descending in any::<bool>()) {
        let order = if descending { SortOrder::Desc } else { SortOrder::Asc };
        let input = Relation::from_rows_owned(rows, "emp");
        let result = SortExecutor::by(0, order).execute(input);

        let entries: Vec<_> = result.iter().collect();
        for pair in entries.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (ka, kb) = (a.get_field(0), b.get_field(0));
            match order {
                SortOrder::Asc => prop_assert!(ka <= kb),
                SortOrder::Desc => prop_assert!(ka >= kb),
            }
            if ka == kb {
                prop_assert!(a.id() < b.id());
            }
        }
    }

    /// Distinct keeps exactly the first row for each key.
    #[test]
    fn distinct_keeps_first_occurrence(rows in keyed_rows_strategy(50)) {
        let mut seen = Vec::new();
        let mut expected_ids = Vec::new();
        for row in &rows {
            let key = row.get(0).cloned();
            if !seen.contains(&key) {
                seen.push(key);
                expected_ids.push(row.id());
            }
        }

        let input = Relation::from_rows_owned(rows, "emp");
        let result = DistinctExecutor::new(vec![0]).execute(input);
        let ids: Vec<u64> = result.iter().map(|e| e.id()).collect();

        prop_assert_eq!(ids, expected_ids);
    }

    /// Empty inputs produce empty inner joins.
    #[test]
    fn empty_side_produces_empty_result(rows in rows_strategy(30)) {
        let rows = Relation::from_rows_owned(rows, "rows");
        let empty = Relation::from_rows_owned(vec![], "empty");

        prop_assert!(HashJoin::inner(0, 0).execute(empty.clone(), rows.clone()).is_empty());
        prop_assert!(HashJoin::inner(0, 0).execute(rows, empty).is_empty());
    }
}
