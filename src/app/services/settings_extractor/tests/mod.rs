//! Test utilities for settings extraction

use crate::app::models::{CommentRecord, ObjectRecord, Record};


/// Build an object record outside any zone
pub fn object(keyword: &str, fields: &[&str]) -> Record {
    Record::Object(ObjectRecord {
        keyword: keyword.to_string(),
        fields: fields.iter().map(|field| field.to_string()).collect(),
        zone: None,
    })
}

/// Build a settings comment record
pub fn setting_comment(key: &str, value: &str) -> Record {
    Record::Comment(CommentRecord {
        raw_text: format!("{}: {}", key, value),
        parsed_key: Some(key.to_string()),
        parsed_value: Some(value.to_string()),
        zone: None,
    })
}

/// Values with the keyword re-inserted at index 0
pub fn values(keyword: &str, fields: &[&str]) -> Vec<String> {
    std::iter::once(keyword)
        .chain(fields.iter().copied())
        .map(str::to_string)
        .collect()
}
