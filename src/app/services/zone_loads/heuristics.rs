//! Name-based classification rules
//!
//! Every substring heuristic used by the extractors lives here so the exact
//! substrings are pinned by tests in one place. All matching is
//! case-insensitive.

use crate::constants::SCHEDULE_NAME_MARKER;

/// Case-insensitive substring test
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether an `OtherEquipment` object counts as non-fixed equipment
///
/// True when its name or its schedule name contains any marker.
pub fn is_non_fixed_equipment(name: &str, schedule: Option<&str>, markers: &[String]) -> bool {
    markers.iter().any(|marker| {
        contains_ignore_case(name, marker)
            || schedule.is_some_and(|schedule| contains_ignore_case(schedule, marker))
    })
}

/// Whether a schedule name marks a thermostat setpoint schedule
pub fn is_setpoint_schedule_name(name: &str, indicators: &[String]) -> bool {
    indicators
        .iter()
        .any(|indicator| contains_ignore_case(name, indicator))
}

/// Whether a field value looks like a schedule reference
pub fn references_schedule(value: &str) -> bool {
    contains_ignore_case(value, SCHEDULE_NAME_MARKER)
}
