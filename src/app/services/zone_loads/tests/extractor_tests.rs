//! Tests for the zone load extractor sink

use indexmap::IndexMap;

use super::{extract, object_in, zone_fields};
use crate::app::models::SetpointLink;
use crate::app::services::zone_loads::{apply_setpoint_links, derive_air_changes};

const INFILTRATION: &str = "ZoneInfiltration:DesignFlowRate";
const VENTILATION: &str = "ZoneVentilation:DesignFlowRate";

#[test]
fn test_zone_geometry_and_infiltration_scenario() {
    let extractor = extract(&[
        object_in(Some("Z1"), "Zone", &zone_fields("Z1", "100.0", "250.0")),
        object_in(Some("Z1"), INFILTRATION, &["Infil1", "Z1", "InfilSched", "0.05"]),
    ]);

    let zones = extractor.zone_load_data();
    let z1 = &zones["Z1"];
    assert_eq!(z1.zone_floor_area, Some(100.0));
    assert_eq!(z1.zone_volume, Some(250.0));
    assert_eq!(z1.infiltration_schedule.as_deref(), Some("InfilSched"));
    let ach = z1.infiltration_ach.unwrap();
    assert!((ach - 0.72).abs() < 1e-9);
}

#[test]
fn test_direct_ach_overrides_flow_rate() {
    let extractor = extract(&[
        object_in(Some("Z1"), "Zone", &zone_fields("Z1", "40", "100")),
        object_in(
            Some("Z1"),
            INFILTRATION,
            &["Infil1", "Z1", "InfilSched", "0.02", "0", "0", "0.5"],
        ),
    ]);

    let zones = extractor.zone_load_data();
    assert_eq!(zones["Z1"].infiltration_ach, Some(0.5));
}

#[test]
fn test_ventilation_ach_from_flow() {
    let extractor = extract(&[
        object_in(Some("Z1"), "Zone", &zone_fields("Z1", "40", "360")),
        object_in(Some("Z1"), VENTILATION, &["Vent1", "Z1", "VentSched", "0.1"]),
    ]);
    let zones = extractor.zone_load_data();
    let ach = zones["Z1"].ventilation_ach.unwrap();
    assert!((ach - 1.0).abs() < 1e-9);
    assert_eq!(zones["Z1"].ventilation_design.design_flow_rate, Some(0.1));
}

#[test]
fn test_derive_air_changes_rules() {
    assert_eq!(derive_air_changes(Some(0.5), Some(0.02), Some(100.0)), Some(0.5));
    assert_eq!(derive_air_changes(Some(0.5), None, None), Some(0.5));
    assert_eq!(derive_air_changes(None, Some(0.02), None), None);
    assert_eq!(derive_air_changes(None, Some(0.02), Some(0.0)), None);
    assert_eq!(derive_air_changes(None, Some(0.02), Some(-5.0)), None);
    assert_eq!(derive_air_changes(None, None, Some(100.0)), None);
    assert_eq!(derive_air_changes(None, Some(0.0), Some(100.0)), Some(0.0));
}

#[test]
fn test_per_area_terms_do_not_contribute_to_ach() {
    let extractor = extract(&[
        object_in(Some("Z1"), "Zone", &zone_fields("Z1", "40", "100")),
        object_in(Some("Z1"), INFILTRATION, &["Infil1", "Z1", "InfilSched", "0", "0.001", "0.0003"]),
    ]);
    let zones = extractor.zone_load_data();
    let z1 = &zones["Z1"];
    assert_eq!(z1.infiltration_design.flow_per_zone_floor_area, Some(0.001));
    assert_eq!(z1.infiltration_design.flow_per_exterior_surface_area, Some(0.0003));
    assert_eq!(z1.infiltration_ach, Some(0.0));
}

#[test]
fn test_people_and_lights() {
    let extractor = extract(&[
        object_in(Some("Z1"), "People", &["P1", "Z1", "Occ Sch", "People/Area", "x", "0.05"]),
        object_in(Some("Z1"), "Lights", &["L1", "Z1", "Light Sch", "Watts/Area", "x", "8.5"]),
    ]);
    let zones = extractor.zone_load_data();
    let z1 = &zones["Z1"];
    assert_eq!(z1.occupancy_schedule.as_deref(), Some("Occ Sch"));
    assert_eq!(z1.occupancy_people_per_area, Some(0.05));
    assert_eq!(z1.occupancy_activity_schedule, None);
    assert_eq!(z1.lighting_schedule.as_deref(), Some("Light Sch"));
    assert_eq!(z1.lighting_watts_per_area, Some(8.5));
}

#[test]
fn test_equipment_classification() {
    let extractor = extract(&[
        object_in(
            Some("Z1"),
            "OtherEquipment",
            &["Z1 Miscellaneous", "None", "Z1", "Misc Sch", "Watts/Area", "x", "5.0"],
        ),
        object_in(
            Some("Z1"),
            "OtherEquipment",
            &["Z1 Servers", "None", "Z1", "Server Sch", "Watts/Area", "x", "12.0"],
        ),
    ]);
    let zones = extractor.zone_load_data();
    let z1 = &zones["Z1"];
    assert_eq!(z1.non_fixed_equip_watts_per_area, Some(5.0));
    assert_eq!(z1.non_fixed_equip_schedule.as_deref(), Some("Misc Sch"));
    assert_eq!(z1.fixed_equip_watts_per_area, Some(12.0));
    assert_eq!(z1.fixed_equip_schedule.as_deref(), Some("Server Sch"));
}

#[test]
fn test_missing_equipment_values_do_not_clear_earlier_ones() {
    let extractor = extract(&[
        object_in(
            Some("Z1"),
            "OtherEquipment",
            &["Servers", "None", "Z1", "Server Sch", "Watts/Area", "x", "12.0"],
        ),
        object_in(Some("Z1"), "OtherEquipment", &["More Servers"]),
    ]);
    let zones = extractor.zone_load_data();
    assert_eq!(zones["Z1"].fixed_equip_watts_per_area, Some(12.0));
    assert_eq!(zones["Z1"].fixed_equip_schedule.as_deref(), Some("Server Sch"));
}

#[test]
fn test_non_numeric_field_only_nulls_its_attribute() {
    let extractor = extract(&[object_in(
        Some("Z1"),
        "Zone",
        &["Z1", "0", "0", "0", "0", "1", "big", "250"],
    )]);
    let zones = extractor.zone_load_data();
    assert_eq!(zones["Z1"].zone_floor_area, None);
    assert_eq!(zones["Z1"].zone_volume, Some(250.0));
    assert_eq!(extractor.field_anomalies(), 1);
}

#[test]
fn test_objects_without_zone_are_ignored() {
    let extractor = extract(&[object_in(None, "Lights", &["L1", "Z1", "Sch", "x", "x", "5"])]);
    assert!(extractor.zone_load_data().is_empty());
}

#[test]
fn test_any_object_in_zone_creates_record_with_placeholders() {
    let extractor = extract(&[object_in(Some("Z9"), "BuildingSurface:Detailed", &["Wall"])]);
    let zones = extractor.zone_load_data();
    let z9 = &zones["Z9"];
    assert_eq!(z9.heating_availability_schedule, "Z9 Heating Availability Sch");
    assert_eq!(z9.cooling_availability_schedule, "Z9 Cooling Availability Sch");
    assert_eq!(z9.zone_volume, None);
}

#[test]
fn test_setpoint_links_collected_regardless_of_zone() {
    let extractor = extract(&[
        object_in(None, "ThermostatSetpoint:DualSetpoint", &["Dual SP 1", "Htg Sch", "Clg Sch"]),
        object_in(Some("Z1"), "ThermostatSetpoint:DualSetpoint", &["Dual SP 2", "Htg2"]),
    ]);

    let links = extractor.setpoint_links();
    assert_eq!(links.len(), 2);
    assert_eq!(links["Dual SP 1"].heating_schedule.as_deref(), Some("Htg Sch"));
    assert_eq!(links["Dual SP 1"].cooling_schedule.as_deref(), Some("Clg Sch"));
    assert_eq!(links["Dual SP 2"].cooling_schedule, None);
    // setpoint objects do not create zone records
    assert!(extractor.zone_load_data().is_empty());
}

#[test]
fn test_thermostat_link_join() {
    let extractor = extract(&[
        object_in(Some("Z1"), "Zone", &zone_fields("Z1", "40", "100")),
        object_in(
            Some("Z1"),
            "ZoneControl:Thermostat",
            &["Z1 Thermostat", "Z1", "Ctrl Sch", "ThermostatSetpoint:DualSetpoint", "Z1 Dual SP"],
        ),
        object_in(Some("Z2"), "Zone", &zone_fields("Z2", "40", "100")),
        object_in(None, "ThermostatSetpoint:DualSetpoint", &["Z1 Dual SP", "Htg", "Clg"]),
    ]);

    let mut zones = extractor.zone_load_data();
    assert_eq!(zones["Z1"].heating_setpoint_schedule, None);

    apply_setpoint_links(&mut zones, extractor.setpoint_links());
    assert_eq!(zones["Z1"].thermostat_setpoint_object_name.as_deref(), Some("Z1 Dual SP"));
    assert_eq!(zones["Z1"].heating_setpoint_schedule.as_deref(), Some("Htg"));
    assert_eq!(zones["Z1"].cooling_setpoint_schedule.as_deref(), Some("Clg"));
    assert_eq!(zones["Z2"].heating_setpoint_schedule, None);
}

#[test]
fn test_apply_setpoint_links_ignores_unknown_thermostats() {
    let extractor = extract(&[object_in(
        Some("Z1"),
        "ZoneControl:Thermostat",
        &["T", "Z1", "Ctrl", "ThermostatSetpoint:DualSetpoint", "Unknown"],
    )]);
    let mut zones = extractor.zone_load_data();
    apply_setpoint_links(&mut zones, &IndexMap::<String, SetpointLink>::new());
    assert_eq!(zones["Z1"].heating_setpoint_schedule, None);
}
