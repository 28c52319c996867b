//! Limit executor.

use crate::executor::Relation;

/// Limit executor - applies LIMIT and OFFSET to a relation.
pub struct LimitExecutor {
    limit: usize,
    offset: usize,
}

impl LimitExecutor {
    /// Creates a new limit executor.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Creates a limit executor with only a limit (no offset).
    pub fn limit_only(limit: usize) -> Self {
        Self { limit, offset: 0 }
    }

    /// Executes the limit on the input relation.
    pub fn execute(&self, mut input: Relation) -> Relation {
        let len = input.entries.len();
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.limit).min(len);

        // Truncate tail first (drops elements after end)
        input.entries.truncate(end);
        // Remove head elements (drops elements before start)
        if start > 0 {
            input.entries.drain(..start);
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use scott_core::{Row, Value};

    fn ten_rows() -> Relation {
        let rows: Vec<Row> = (0..10)
            .map(|i| Row::new(i, vec![Value::Int64(i as i64)]))
            .collect();
        Relation::from_rows_owned(rows, "t")
    }

    #[test]
    fn test_limit_executor() {
        let executor = LimitExecutor::new(3, 2);
        let result = executor.execute(ten_rows());

        assert_eq!(result.len(), 3);
        assert_eq!(result.entries[0].get_field(0), Some(&Value::Int64(2)));
        assert_eq!(result.entries[1].get_field(0), Some(&Value::Int64(3)));
        assert_eq!(result.entries[2].get_field(0), Some(&Value::Int64(4)));
    }

    #[test]
    fn test_limit_only() {
        let executor = LimitExecutor::limit_only(5);
        let result = executor.execute(ten_rows());

        assert_eq!(result.len(), 5);
        assert_eq!(result.entries[0].get_field(0), Some(&Value::Int64(0)));
    }

    #[test]
    fn test_limit_exceeds_size() {
        let result = LimitExecutor::new(100, 0).execute(ten_rows());
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn test_offset_exceeds_size() {
        let result = LimitExecutor::new(10, 100).execute(ten_rows());
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_unbounded_limit_does_not_overflow() {
        let result = LimitExecutor::new(usize::MAX, 3).execute(ten_rows());
        assert_eq!(result.len(), 7);
    }
}
