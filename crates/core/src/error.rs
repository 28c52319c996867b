//! Error types for the SCOTT engine.

use crate::types::DataType;
use crate::value::Value;
use alloc::string::String;
use core::fmt;

/// Result type alias for engine and dataset operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for engine and dataset operations.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Type mismatch error.
    TypeMismatch {
        column: String,
        expected: DataType,
        got: Option<DataType>,
    },
    /// A lookup keyed by a value found nothing.
    NotFound {
        table: String,
        key: Value,
    },
    /// Column not found.
    ColumnNotFound {
        table: String,
        column: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeMismatch { column, expected, got } => match got {
                Some(got) => write!(
                    f,
                    "Type mismatch on column {}: expected {:?}, got {:?}",
                    column, expected, got
                ),
                None => write!(
                    f,
                    "Type mismatch on column {}: expected {:?}, got NULL",
                    column, expected
                ),
            },
            Error::NotFound { table, key } => {
                write!(f, "Not found in {}: {}", table, key)
            }
            Error::ColumnNotFound { table, column } => {
                write!(f, "Column {} not found in table {}", column, table)
            }
        }
    }
}

impl core::error::Error for Error {}

impl Error {
    /// Creates a type mismatch error for `column`, inspecting the offending value.
    pub fn type_mismatch(column: impl Into<String>, expected: DataType, got: &Value) -> Self {
        Error::TypeMismatch {
            column: column.into(),
            expected,
            got: got.data_type(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(table: impl Into<String>, key: Value) -> Self {
        Error::NotFound {
            table: table.into(),
            key,
        }
    }

    /// Creates a column not found error.
    pub fn column_not_found(table: impl Into<String>, column: impl Into<String>) -> Self {
        Error::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }
}
