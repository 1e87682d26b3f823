//! Positional field access for object records
//!
//! Field lists have empty entries removed, so an index may simply not exist.
//! Neither helper fails: absence and bad numbers are values, not errors.

use crate::app::models::FieldValue;

/// Read a numeric field by position
pub fn parse_optional_float(fields: &[String], index: usize) -> FieldValue {
    match fields.get(index).map(|value| value.trim()) {
        None | Some("") => FieldValue::Missing,
        Some(value) => value
            .parse::<f64>()
            .map(FieldValue::Number)
            .unwrap_or_else(|_| FieldValue::Invalid(value.to_string())),
    }
}

/// Read a text field by position; empty text counts as absent
pub fn optional_string(fields: &[String], index: usize) -> Option<String> {
    fields
        .get(index)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
