//! Fixed-shape decoding of load-related objects
//!
//! Each recognised keyword has a struct naming the fields the extractor
//! uses, with the source index of each one noted on the field. Indices refer
//! to the object's field list (keyword excluded, empty entries removed).

use super::field_parsers::{optional_string, parse_optional_float};
use crate::app::models::{FieldValue, ObjectRecord};
use crate::constants::keywords;

/// `Zone`
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneFields {
    /// index 6
    pub floor_area: FieldValue,
    /// index 7
    pub volume: FieldValue,
}

/// `People`
#[derive(Debug, Clone, PartialEq)]
pub struct PeopleFields {
    /// index 2
    pub schedule: Option<String>,
    /// index 5
    pub people_per_area: FieldValue,
    /// index 8
    pub activity_schedule: Option<String>,
    /// index 14
    pub clothing_schedule: Option<String>,
    /// index 15
    pub air_velocity_schedule: Option<String>,
}

/// `Lights`
#[derive(Debug, Clone, PartialEq)]
pub struct LightsFields {
    /// index 2
    pub schedule: Option<String>,
    /// index 5
    pub watts_per_area: FieldValue,
}

/// `OtherEquipment`
#[derive(Debug, Clone, PartialEq)]
pub struct OtherEquipmentFields {
    /// index 0
    pub name: Option<String>,
    /// index 3
    pub schedule: Option<String>,
    /// index 6
    pub watts_per_area: FieldValue,
}

/// `ZoneControl:Thermostat`
#[derive(Debug, Clone, PartialEq)]
pub struct ThermostatControlFields {
    /// index 1
    pub zone_reference: Option<String>,
    /// index 3
    pub control_object_type: Option<String>,
    /// index 4
    pub control_object_name: Option<String>,
}

/// `ThermostatSetpoint:DualSetpoint`
#[derive(Debug, Clone, PartialEq)]
pub struct DualSetpointFields {
    /// index 0
    pub name: Option<String>,
    /// index 1
    pub heating_schedule: Option<String>,
    /// index 2
    pub cooling_schedule: Option<String>,
}

/// `ZoneInfiltration:DesignFlowRate`
#[derive(Debug, Clone, PartialEq)]
pub struct InfiltrationFields {
    /// index 2
    pub schedule: Option<String>,
    /// index 3, m3/s
    pub design_flow_rate: FieldValue,
    /// index 4
    pub flow_per_zone_floor_area: FieldValue,
    /// index 5
    pub flow_per_exterior_surface_area: FieldValue,
    /// index 6
    pub air_changes_per_hour: FieldValue,
}

/// `ZoneVentilation:DesignFlowRate`
#[derive(Debug, Clone, PartialEq)]
pub struct VentilationFields {
    /// index 2
    pub schedule: Option<String>,
    /// index 3, m3/s
    pub design_flow_rate: FieldValue,
    /// index 4
    pub flow_per_zone_floor_area: FieldValue,
    /// index 5
    pub flow_per_person: FieldValue,
    /// index 6
    pub air_changes_per_hour: FieldValue,
}

/// A decoded load-related object
#[derive(Debug, Clone, PartialEq)]
pub enum LoadObject {
    Zone(ZoneFields),
    People(PeopleFields),
    Lights(LightsFields),
    OtherEquipment(OtherEquipmentFields),
    ThermostatControl(ThermostatControlFields),
    DualSetpoint(DualSetpointFields),
    Infiltration(InfiltrationFields),
    Ventilation(VentilationFields),
}

impl LoadObject {
    /// Decode an object whose keyword the zone-load extractor recognises
    pub fn decode(object: &ObjectRecord) -> Option<Self> {
        let f = object.fields.as_slice();

        let decoded = if object.is(keywords::ZONE) {
            Self::Zone(ZoneFields {
                floor_area: parse_optional_float(f, 6),
                volume: parse_optional_float(f, 7),
            })
        } else if object.is(keywords::PEOPLE) {
            Self::People(PeopleFields {
                schedule: optional_string(f, 2),
                people_per_area: parse_optional_float(f, 5),
                activity_schedule: optional_string(f, 8),
                clothing_schedule: optional_string(f, 14),
                air_velocity_schedule: optional_string(f, 15),
            })
        } else if object.is(keywords::LIGHTS) {
            Self::Lights(LightsFields {
                schedule: optional_string(f, 2),
                watts_per_area: parse_optional_float(f, 5),
            })
        } else if object.is(keywords::OTHER_EQUIPMENT) {
            Self::OtherEquipment(OtherEquipmentFields {
                name: optional_string(f, 0),
                schedule: optional_string(f, 3),
                watts_per_area: parse_optional_float(f, 6),
            })
        } else if object.is(keywords::ZONE_CONTROL_THERMOSTAT) {
            Self::ThermostatControl(ThermostatControlFields {
                zone_reference: optional_string(f, 1),
                // Field 2 is the control type schedule; the setpoint object
                // named at 4 is what the setpoint join is keyed on, not its
                // type at 3
                control_object_type: optional_string(f, 3),
                control_object_name: optional_string(f, 4),
            })
        } else if object.is(keywords::THERMOSTAT_DUAL_SETPOINT) {
            Self::DualSetpoint(DualSetpointFields {
                name: optional_string(f, 0),
                heating_schedule: optional_string(f, 1),
                cooling_schedule: optional_string(f, 2),
            })
        } else if object.is(keywords::ZONE_INFILTRATION) {
            Self::Infiltration(InfiltrationFields {
                schedule: optional_string(f, 2),
                design_flow_rate: parse_optional_float(f, 3),
                flow_per_zone_floor_area: parse_optional_float(f, 4),
                flow_per_exterior_surface_area: parse_optional_float(f, 5),
                air_changes_per_hour: parse_optional_float(f, 6),
            })
        } else if object.is(keywords::ZONE_VENTILATION) {
            Self::Ventilation(VentilationFields {
                schedule: optional_string(f, 2),
                design_flow_rate: parse_optional_float(f, 3),
                flow_per_zone_floor_area: parse_optional_float(f, 4),
                flow_per_person: parse_optional_float(f, 5),
                air_changes_per_hour: parse_optional_float(f, 6),
            })
        } else {
            return None;
        };

        Some(decoded)
    }

    /// Numeric fields that were present but not numbers
    pub fn invalid_numbers(&self) -> Vec<&str> {
        let numbers: Vec<&FieldValue> = match self {
            Self::Zone(zone) => vec![&zone.floor_area, &zone.volume],
            Self::People(people) => vec![&people.people_per_area],
            Self::Lights(lights) => vec![&lights.watts_per_area],
            Self::OtherEquipment(equipment) => vec![&equipment.watts_per_area],
            Self::Infiltration(infiltration) => vec![
                &infiltration.design_flow_rate,
                &infiltration.flow_per_zone_floor_area,
                &infiltration.flow_per_exterior_surface_area,
                &infiltration.air_changes_per_hour,
            ],
            Self::Ventilation(ventilation) => vec![
                &ventilation.design_flow_rate,
                &ventilation.flow_per_zone_floor_area,
                &ventilation.flow_per_person,
                &ventilation.air_changes_per_hour,
            ],
            Self::ThermostatControl(_) | Self::DualSetpoint(_) => Vec::new(),
        };

        numbers
            .into_iter()
            .filter_map(|value| match value {
                FieldValue::Invalid(text) => Some(text.as_str()),
                FieldValue::Number(_) | FieldValue::Missing => None,
            })
            .collect()
    }
}
