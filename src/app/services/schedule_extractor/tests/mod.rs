//! Test utilities for schedule extraction and expansion

use crate::app::models::{ObjectRecord, Record, TimeValuePair};


/// Build a `Schedule:Compact` record
pub fn compact_schedule(name: &str, schedule_type: &str, rules: &[&str]) -> Record {
    let fields = [name, schedule_type]
        .iter()
        .chain(rules.iter())
        .map(|field| field.to_string())
        .collect();
    Record::Object(ObjectRecord {
        keyword: "Schedule:Compact".to_string(),
        fields,
        zone: None,
    })
}

/// Build time/value pairs from `(end_time, value)` tuples
pub fn pairs(raw: &[(&str, &str)]) -> Vec<TimeValuePair> {
    raw.iter()
        .map(|(end_time, value)| TimeValuePair::new(*end_time, *value))
        .collect()
}

/// Rule fields as owned strings
pub fn rules(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|field| field.to_string()).collect()
}
