//! Table scan executor.

use crate::executor::Relation;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use scott_core::Row;

/// Table scan executor - scans all rows of a table under a name or alias.
pub struct TableScanExecutor {
    table: String,
    column_count: usize,
    rows: Vec<Rc<Row>>,
}

impl TableScanExecutor {
    /// Creates a new table scan executor.
    pub fn new(table: impl Into<String>, column_count: usize, rows: Vec<Rc<Row>>) -> Self {
        Self {
            table: table.into(),
            column_count,
            rows,
        }
    }

    /// Re-labels the scan; scanning one table under two aliases gives a self-join
    /// two independent relations over the same rows.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.table = alias.into();
        self
    }

    /// Executes the scan and returns the relation.
    pub fn execute(&self) -> Relation {
        Relation::from_rows(self.rows.clone(), self.table.clone(), self.column_count)
    }
}
