//! Project executor.

use crate::ast::Expr;
use crate::executor::{Relation, RelationEntry, SharedTables};
use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use scott_core::{Row, Value};

/// Project executor - projects specific columns from rows.
pub struct ProjectExecutor {
    /// Column indices to project.
    column_indices: Vec<usize>,
}

impl ProjectExecutor {
    /// Creates a new project executor.
    pub fn new(column_indices: Vec<usize>) -> Self {
        Self { column_indices }
    }

    /// Executes the projection on the input relation.
    pub fn execute(&self, input: Relation) -> Relation {
        project_relation(input, self.column_indices.len(), |entry| {
            self.column_indices
                .iter()
                .map(|&idx| entry.get_field(idx).cloned().unwrap_or(Value::Null))
                .collect()
        })
    }
}

/// Computed projection - evaluates one expression per output column.
pub struct ComputeExecutor {
    exprs: Vec<Expr>,
}

impl ComputeExecutor {
    /// Creates a new computed projection.
    pub fn new(exprs: Vec<Expr>) -> Self {
        Self { exprs }
    }

    /// Executes the projection on the input relation.
    pub fn execute(&self, input: Relation) -> Relation {
        project_relation(input, self.exprs.len(), |entry| {
            self.exprs.iter().map(|e| e.eval(&entry.row)).collect()
        })
    }
}

/// Projects columns from a relation using a transformation function.
///
/// Rows keep their identity; the output is described as a single block of
/// `column_count` columns.
fn project_relation<F>(input: Relation, column_count: usize, transform: F) -> Relation
where
    F: Fn(&RelationEntry) -> Vec<Value>,
{
    let tables = input.tables().to_vec();
    let shared_tables: SharedTables = tables.clone().into();
    let entries: Vec<RelationEntry> = input
        .entries
        .into_iter()
        .map(|entry| {
            let values = transform(&entry);
            RelationEntry::new_shared(Rc::new(Row::new(entry.id(), values)), shared_tables.clone())
        })
        .collect();

    Relation {
        entries,
        tables,
        table_column_counts: vec![column_count],
    }
}
