//! Data type definitions.
//!
//! This module defines the column types the tutorial tables are built from.

/// Supported column types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean type (true/false)
    Boolean,
    /// 64-bit signed integer
    Int64,
    /// 64-bit floating point number
    Float64,
    /// UTF-8 string
    String,
    /// Date and time stored as Unix timestamp (milliseconds)
    DateTime,
}

impl DataType {
    /// Returns whether values of this type take part in arithmetic.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }

    /// Returns the SQL spelling of this type.
    pub fn sql_name(&self) -> &'static str {
        match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Int64 => "NUMBER",
            DataType::Float64 => "FLOAT",
            DataType::String => "VARCHAR2",
            DataType::DateTime => "DATE",
        }
    }
}
