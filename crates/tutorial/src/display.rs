//! Plain-text rendering of query results.

use crate::model::millis_to_date;
use scott_core::{Row, Value};

/// Renders a cell for display: dates as `YYYY-MM-DD`, averages to two decimals,
/// NULL as an empty string.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::DateTime(millis) => match millis_to_date(*millis) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => value.to_string(),
        },
        Value::Float64(f) if f.fract() != 0.0 => format!("{:.2}", f),
        other => other.to_string(),
    }
}

/// Renders a row with `separator` between cells.
pub fn render_row(row: &Row, separator: &str) -> String {
    row.values()
        .iter()
        .map(render_value)
        .collect::<Vec<_>>()
        .join(separator)
}
