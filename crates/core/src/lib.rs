//! SCOTT Core - Value, row and error types shared by the query engine.
//!
//! This crate provides the foundational types for the in-memory tutorial tables:
//!
//! - `DataType`: Supported column types (Boolean, Int64, Float64, String, DateTime)
//! - `Value`: Runtime cell values, with `Null` standing in for absent optional fields
//! - `Row`: An ordered list of values with an identifier
//! - `Error`: Error types for engine and dataset operations
//!
//! # Example
//!
//! ```rust
//! use scott_core::{Row, Value};
//!
//! let row = Row::new(7499, vec![
//!     Value::Int64(7499),
//!     Value::String("ALLEN".into()),
//!     Value::Null,
//! ]);
//!
//! assert_eq!(row.id(), 7499);
//! assert_eq!(row.get(1), Some(&Value::String("ALLEN".into())));
//! assert!(row.get(2).is_some_and(Value::is_null));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod row;
mod types;
mod value;

pub use error::{Error, Result};
pub use row::{Row, RowId, DUMMY_ROW_ID};
pub use types::DataType;
pub use value::Value;
