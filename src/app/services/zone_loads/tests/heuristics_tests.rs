//! Tests pinning the classification substrings

use crate::app::services::zone_loads::heuristics::*;
use crate::constants::{DEFAULT_NON_FIXED_EQUIPMENT_MARKERS, DEFAULT_SETPOINT_INDICATORS};

fn markers() -> Vec<String> {
    DEFAULT_NON_FIXED_EQUIPMENT_MARKERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn indicators() -> Vec<String> {
    DEFAULT_SETPOINT_INDICATORS.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_default_markers_are_pinned() {
    assert_eq!(DEFAULT_NON_FIXED_EQUIPMENT_MARKERS, &["non fixed", "miscellaneous"]);
    assert_eq!(DEFAULT_SETPOINT_INDICATORS, &["Setpoint", "SP"]);
}

#[test]
fn test_non_fixed_by_name() {
    assert!(is_non_fixed_equipment("Office NON FIXED Equipment", None, &markers()));
    assert!(is_non_fixed_equipment("Miscellaneous loads", None, &markers()));
    assert!(!is_non_fixed_equipment("Server rack", None, &markers()));
    assert!(!is_non_fixed_equipment("Non-fixed equipment", None, &markers()));
}

#[test]
fn test_non_fixed_by_schedule() {
    assert!(is_non_fixed_equipment(
        "Equipment 1",
        Some("Office Non Fixed Sch"),
        &markers()
    ));
    assert!(is_non_fixed_equipment(
        "Equipment 1",
        Some("miscellaneous sch"),
        &markers()
    ));
    assert!(!is_non_fixed_equipment("Equipment 1", Some("Office Sch"), &markers()));
}

#[test]
fn test_setpoint_schedule_names() {
    assert!(is_setpoint_schedule_name("Heating Setpoint", &indicators()));
    assert!(is_setpoint_schedule_name("Office Cooling SP", &indicators()));
    assert!(is_setpoint_schedule_name("clg sp sch", &indicators()));
    // "sp" is matched anywhere in the name
    assert!(is_setpoint_schedule_name("Space Heating", &indicators()));
    assert!(!is_setpoint_schedule_name("Office Lighting", &indicators()));
}

#[test]
fn test_references_schedule() {
    assert!(references_schedule("Office Occupancy Schedule"));
    assert!(references_schedule("SCHEDULE 1"));
    assert!(!references_schedule("Office Occupancy Sch"));
    assert!(!references_schedule("0.5"));
}
