//! Aggregate executor.

use crate::ast::AggregateFunc;
use crate::executor::{Relation, RelationEntry, SharedTables};
use alloc::rc::Rc;
use alloc::vec::Vec;
use hashbrown::HashMap;
use scott_core::{Row, Value};

/// Aggregate executor - computes aggregate functions, optionally per group.
///
/// Output rows are the `group_by` values (in order) followed by one value per
/// aggregate. Groups appear in the order their first row appears in the input.
pub struct AggregateExecutor {
    /// Group by column indices.
    group_by: Vec<usize>,
    /// Aggregates to compute: (function, column_index). `None` means `COUNT(*)`.
    aggregates: Vec<(AggregateFunc, Option<usize>)>,
}

impl AggregateExecutor {
    /// Creates a new aggregate executor.
    pub fn new(group_by: Vec<usize>, aggregates: Vec<(AggregateFunc, Option<usize>)>) -> Self {
        Self {
            group_by,
            aggregates,
        }
    }

    /// Creates an aggregate executor with no grouping.
    pub fn no_group(aggregates: Vec<(AggregateFunc, Option<usize>)>) -> Self {
        Self::new(Vec::new(), aggregates)
    }

    /// Executes the aggregation on the input relation.
    pub fn execute(&self, input: Relation) -> Relation {
        let tables = input.tables().to_vec();
        let shared_tables: SharedTables = tables.clone().into();
        let result_column_count = self.group_by.len() + self.aggregates.len();

        if self.group_by.is_empty() {
            // No grouping - aggregate entire relation into a single row
            let entries: Vec<&RelationEntry> = input.iter().collect();
            let values = self.compute_aggregates(&entries);
            let entry = RelationEntry::new_shared(Rc::new(Row::dummy(values)), shared_tables);
            return Relation {
                entries: alloc::vec![entry],
                tables,
                table_column_counts: alloc::vec![result_column_count],
            };
        }

        // Group by specified columns, remembering first-occurrence order
        let mut group_index: HashMap<Vec<Value>, usize> = HashMap::new();
        let mut groups: Vec<(Vec<Value>, Vec<&RelationEntry>)> = Vec::new();

        for entry in input.iter() {
            let key = self.make_group_key(entry);
            match group_index.get(&key) {
                Some(&idx) => groups[idx].1.push(entry),
                None => {
                    group_index.insert(key.clone(), groups.len());
                    groups.push((key, alloc::vec![entry]));
                }
            }
        }

        let entries: Vec<RelationEntry> = groups
            .into_iter()
            .map(|(mut values, group_entries)| {
                values.extend(self.compute_aggregates(&group_entries));
                RelationEntry::new_shared(Rc::new(Row::dummy(values)), shared_tables.clone())
            })
            .collect();

        Relation {
            entries,
            tables,
            table_column_counts: alloc::vec![result_column_count],
        }
    }

    fn make_group_key(&self, entry: &RelationEntry) -> Vec<Value> {
        self.group_by
            .iter()
            .map(|&idx| entry.get_field(idx).cloned().unwrap_or(Value::Null))
            .collect()
    }

    fn compute_aggregates(&self, entries: &[&RelationEntry]) -> Vec<Value> {
        self.aggregates
            .iter()
            .map(|(func, col_idx)| compute_single_aggregate(*func, *col_idx, entries))
            .collect()
    }
}

/// Non-null values of one column across the given entries.
fn non_null_values<'a>(
    entries: &'a [&'a RelationEntry],
    idx: usize,
) -> impl Iterator<Item = &'a Value> + 'a {
    entries
        .iter()
        .filter_map(move |e| e.get_field(idx))
        .filter(|v| !v.is_null())
}

fn compute_single_aggregate(
    func: AggregateFunc,
    col_idx: Option<usize>,
    entries: &[&RelationEntry],
) -> Value {
    match func {
        AggregateFunc::Count => match col_idx {
            // COUNT(column) - count non-null values
            Some(idx) => Value::Int64(non_null_values(entries, idx).count() as i64),
            // COUNT(*) - count all rows
            None => Value::Int64(entries.len() as i64),
        },
        AggregateFunc::Sum => {
            let values: Vec<&Value> = non_null_values(entries, col_idx.unwrap_or(0)).collect();

            // Integers stay exact; overflow yields NULL
            if values.iter().all(|v| matches!(v, Value::Int64(_))) {
                values
                    .iter()
                    .filter_map(|v| v.as_i64())
                    .try_fold(0i64, i64::checked_add)
                    .map_or(Value::Null, Value::Int64)
            } else {
                Value::Float64(values.iter().filter_map(|v| v.as_number()).sum())
            }
        }
        AggregateFunc::Avg => {
            let idx = col_idx.unwrap_or(0);
            let values: Vec<f64> = non_null_values(entries, idx)
                .filter_map(Value::as_number)
                .collect();

            if values.is_empty() {
                Value::Null
            } else {
                let sum: f64 = values.iter().sum();
                Value::Float64(sum / values.len() as f64)
            }
        }
        AggregateFunc::Min => non_null_values(entries, col_idx.unwrap_or(0))
            .min()
            .cloned()
            .unwrap_or(Value::Null),
        AggregateFunc::Max => non_null_values(entries, col_idx.unwrap_or(0))
            .max()
            .cloned()
            .unwrap_or(Value::Null),
    }
}
