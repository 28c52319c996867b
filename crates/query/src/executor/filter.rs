//! Filter executor.

use crate::ast::Predicate;
use crate::executor::{Relation, RelationEntry};
use alloc::vec::Vec;

/// Filter executor - filters rows based on a predicate.
pub struct FilterExecutor<P: Predicate> {
    predicate: P,
}

impl<P: Predicate> FilterExecutor<P> {
    /// Creates a new filter executor.
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }

    /// Executes the filter on the input relation.
    pub fn execute(&self, input: Relation) -> Relation {
        let entries: Vec<RelationEntry> = input
            .iter()
            .filter(|entry| self.predicate.eval(&entry.row))
            .cloned()
            .collect();

        input.with_entries(entries)
    }
}

/// Filters a relation using a fallible closure; the first error aborts the scan.
pub fn try_filter_relation<F, E>(input: Relation, predicate: F) -> Result<Relation, E>
where
    F: Fn(&RelationEntry) -> Result<bool, E>,
{
    let mut entries = Vec::new();
    for entry in input.iter() {
        if predicate(entry)? {
            entries.push(entry.clone());
        }
    }
    Ok(input.with_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnRef, EvalType, Expr, ValuePredicate};
    use alloc::vec;
    use scott_core::{Row, Value};

    fn salaries() -> Relation {
        let rows = vec![
            Row::new(1, vec![Value::Int64(800), Value::Null]),
            Row::new(2, vec![Value::Int64(1600), Value::Int64(300)]),
            Row::new(3, vec![Value::Int64(1250), Value::Int64(500)]),
        ];
        Relation::from_rows_owned(rows, "emp")
    }

    #[test]
    fn test_filter_executor() {
        let col = ColumnRef::new("emp", "sal", 0);
        let pred = ValuePredicate::new(col, EvalType::Gt, Value::Int64(1000));
        let executor = FilterExecutor::new(pred);

        let result = executor.execute(salaries());
        assert_eq!(result.len(), 2);
        // Order of surviving rows is preserved
        assert_eq!(result.entries[0].id(), 2);
        assert_eq!(result.entries[1].id(), 3);
        assert_eq!(result.table_column_counts(), &[2]);
    }

    #[test]
    fn test_filter_with_expr_predicate() {
        let executor = FilterExecutor::new(Expr::is_not_null(Expr::column("emp", "comm", 1)));
        let result = executor.execute(salaries());
        assert_eq!(result.len(), 2);
        assert!(result.rows().all(|r| !r.get(1).is_some_and(Value::is_null)));
    }

    #[test]
    fn test_try_filter_relation() {
        let kept = try_filter_relation(salaries(), |entry| match entry.get_field(0) {
            Some(Value::Int64(sal)) => Ok(*sal > 1000),
            _ => Err(entry.id()),
        });
        assert_eq!(kept.map(|r| r.len()), Ok(2));

        let failed = try_filter_relation(salaries(), |entry| match entry.get_field(1) {
            Some(Value::Int64(comm)) => Ok(*comm > 0),
            _ => Err(entry.id()),
        });
        assert_eq!(failed.map(|r| r.len()), Err(1));
    }
}
