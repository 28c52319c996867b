//! Relation and RelationEntry types for query execution.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use scott_core::{Row, RowId, Value};

/// Shared table names to avoid repeated cloning during joins.
pub type SharedTables = Arc<[String]>;

/// A relation entry wraps a row with table context.
#[derive(Clone, Debug)]
pub struct RelationEntry {
    /// The underlying row (reference counted for efficient sharing).
    pub row: Rc<Row>,
    /// Table names (or aliases) this entry's columns come from.
    tables: SharedTables,
}

impl RelationEntry {
    /// Creates a relation entry with shared tables (avoids cloning for each row).
    #[inline]
    pub fn new_shared(row: Rc<Row>, shared_tables: SharedTables) -> Self {
        Self {
            row,
            tables: shared_tables,
        }
    }

    /// Creates a relation entry from a single table.
    pub fn from_row(row: Rc<Row>, table: impl Into<String>) -> Self {
        let tables: SharedTables = Arc::from(alloc::vec![table.into()]);
        Self { row, tables }
    }

    /// Returns the row ID.
    pub fn id(&self) -> RowId {
        self.row.id()
    }

    /// Returns the tables this entry belongs to.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Gets a field value by column index.
    pub fn get_field(&self, index: usize) -> Option<&Value> {
        self.row.get(index)
    }

    /// Combines two entries into a joined entry: left columns followed by right columns.
    #[inline]
    pub fn combine(left: &RelationEntry, right: &RelationEntry, combined_tables: SharedTables) -> Self {
        let left_values = left.row.values();
        let right_values = right.row.values();

        let mut values = Vec::with_capacity(left_values.len() + right_values.len());
        values.extend(left_values.iter().cloned());
        values.extend(right_values.iter().cloned());

        Self {
            row: Rc::new(Row::dummy(values)),
            tables: combined_tables,
        }
    }
}

/// A relation is an ordered collection of entries with table context.
#[derive(Clone, Debug)]
pub struct Relation {
    /// The entries in this relation.
    pub entries: Vec<RelationEntry>,
    /// Table names in this relation.
    pub tables: Vec<String>,
    /// Column counts for each table (used for computing offsets in joined relations).
    /// The i-th element is the number of columns in the i-th table.
    pub table_column_counts: Vec<usize>,
}

impl Relation {
    /// Creates a relation from Rc<Row>s of a single table with a known column count.
    pub fn from_rows(rows: Vec<Rc<Row>>, table: impl Into<String>, column_count: usize) -> Self {
        let tables = alloc::vec![table.into()];
        let shared_tables: SharedTables = Arc::from(tables.as_slice());
        let entries = rows
            .into_iter()
            .map(|row| RelationEntry::new_shared(row, shared_tables.clone()))
            .collect();
        Self {
            entries,
            tables,
            table_column_counts: alloc::vec![column_count],
        }
    }

    /// Creates a relation from owned Rows; the column count is inferred from the first row.
    pub fn from_rows_owned(rows: Vec<Row>, table: impl Into<String>) -> Self {
        let column_count = rows.first().map(|r| r.len()).unwrap_or(0);
        Self::from_rows(rows.into_iter().map(Rc::new).collect(), table, column_count)
    }

    /// Builds a relation with the same table context as `self` but different entries.
    pub(crate) fn with_entries(&self, entries: Vec<RelationEntry>) -> Self {
        Self {
            entries,
            tables: self.tables.clone(),
            table_column_counts: self.table_column_counts.clone(),
        }
    }

    /// Returns the tables in this relation.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Returns the column counts for each table.
    pub fn table_column_counts(&self) -> &[usize] {
        &self.table_column_counts
    }

    /// Returns the total number of columns per row.
    pub fn column_count(&self) -> usize {
        self.table_column_counts.iter().sum()
    }

    /// Computes the column offset for a given table name.
    /// Returns None if the table is not found.
    pub fn get_table_offset(&self, table_name: &str) -> Option<usize> {
        let mut offset = 0;
        for (i, t) in self.tables.iter().enumerate() {
            if t == table_name {
                return Some(offset);
            }
            offset += self.table_column_counts.get(i).copied().unwrap_or(0);
        }
        None
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the relation is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &RelationEntry> {
        self.entries.iter()
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.entries.iter().map(|e| e.row.as_ref())
    }

    /// Returns the values of one column, in row order (NULL for short rows).
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        const NULL: &Value = &Value::Null;
        self.entries
            .iter()
            .map(move |e| e.get_field(index).unwrap_or(NULL))
    }
}
