//! Core data structures for IDF extraction
//!
//! Defines the records produced by the stream reader and the datasets each
//! extractor builds from them. Every type here is plain owned data so results
//! can be handed to report generators without borrowing parser state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Opaque zone identity, taken from the name field of a `Zone` object
pub type ZoneId = String;

/// Settings table: category -> setting key -> formatted value
pub type SettingsTable = IndexMap<String, IndexMap<String, String>>;

/// One unit of reader output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Comment(CommentRecord),
    Object(ObjectRecord),
}

impl Record {
    /// Zone context snapshot carried by this record
    pub fn zone(&self) -> Option<&str> {
        match self {
            Record::Comment(comment) => comment.zone.as_deref(),
            Record::Object(object) => object.zone.as_deref(),
        }
    }

    /// The object record, if this is one
    pub fn as_object(&self) -> Option<&ObjectRecord> {
        match self {
            Record::Object(object) => Some(object),
            Record::Comment(_) => None,
        }
    }

    /// The comment record, if this is one
    pub fn as_comment(&self) -> Option<&CommentRecord> {
        match self {
            Record::Comment(comment) => Some(comment),
            Record::Object(_) => None,
        }
    }
}

/// A top-level comment line
///
/// `parsed_key`/`parsed_value` are present only when the comment body has the
/// form `<known settings key>: <value>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub raw_text: String,
    pub parsed_key: Option<String>,
    pub parsed_value: Option<String>,
    pub zone: Option<ZoneId>,
}

impl CommentRecord {
    /// Key/value pair of a recognised settings comment
    pub fn setting(&self) -> Option<(&str, &str)> {
        match (&self.parsed_key, &self.parsed_value) {
            (Some(key), Some(value)) => Some((key.as_str(), value.as_str())),
            _ => None,
        }
    }
}

/// A keyword-prefixed object definition
///
/// `fields` excludes the keyword and every empty entry; each value has had its
/// inline comment stripped and is whitespace-trimmed. Because empty entries
/// are dropped, positional indices shift when a model leaves a field blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub keyword: String,
    pub fields: Vec<String>,
    pub zone: Option<ZoneId>,
}

impl ObjectRecord {
    /// Case-insensitive keyword comparison
    pub fn is(&self, keyword: &str) -> bool {
        self.keyword.eq_ignore_ascii_case(keyword)
    }

    /// Field at `index`, if present
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Outcome of reading a numeric field by position
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Parsed number
    Number(f64),
    /// Index beyond the field list, or an empty value
    Missing,
    /// Present but not numeric
    Invalid(String),
}

impl FieldValue {
    /// The number, treating `Missing` and `Invalid` alike
    pub fn number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Missing | FieldValue::Invalid(_) => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldValue::Invalid(_))
    }
}

/// A unique `Schedule:Compact` definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub schedule_type: String,
    pub raw_rules: Vec<String>,
}

/// Heating/cooling setpoint schedules of one dual-setpoint thermostat object
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetpointLink {
    pub heating_schedule: Option<String>,
    pub cooling_schedule: Option<String>,
}

/// End time and value of one interval in a day schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeValuePair {
    pub end_time: String,
    pub value: String,
}

impl TimeValuePair {
    pub fn new(end_time: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            end_time: end_time.into(),
            value: value.into(),
        }
    }
}

/// Load parameters for one zone
///
/// Created lazily the first time a zone appears in the stream. Infiltration
/// and ventilation ACH are derived on finalisation: a directly specified ACH
/// wins, otherwise `design_flow_rate * 3600 / volume` when volume is positive.
/// The per-area, per-exterior-area and per-person flow terms are kept for
/// reporting but are not part of the ACH figure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneLoadRecord {
    // Geometry
    pub zone_floor_area: Option<f64>,
    pub zone_volume: Option<f64>,

    // Occupancy
    pub occupancy_people_per_area: Option<f64>,
    pub occupancy_schedule: Option<String>,
    pub occupancy_activity_schedule: Option<String>,
    pub occupancy_clothing_schedule: Option<String>,
    pub occupancy_air_velocity_schedule: Option<String>,

    // Lighting
    pub lighting_watts_per_area: Option<f64>,
    pub lighting_schedule: Option<String>,

    // Equipment
    pub non_fixed_equip_watts_per_area: Option<f64>,
    pub non_fixed_equip_schedule: Option<String>,
    pub fixed_equip_watts_per_area: Option<f64>,
    pub fixed_equip_schedule: Option<String>,

    // Thermostat, setpoints resolved after the pass
    pub thermostat_setpoint_object_name: Option<String>,
    pub heating_setpoint_schedule: Option<String>,
    pub cooling_setpoint_schedule: Option<String>,

    /// Placeholder: `"<zone> Heating Availability Sch"`, not read from the file
    pub heating_availability_schedule: String,
    /// Placeholder: `"<zone> Cooling Availability Sch"`, not read from the file
    pub cooling_availability_schedule: String,

    // Infiltration
    pub infiltration_ach: Option<f64>,
    pub infiltration_schedule: Option<String>,
    pub infiltration_design: InfiltrationDesign,

    // Ventilation
    pub ventilation_ach: Option<f64>,
    pub ventilation_schedule: Option<String>,
    pub ventilation_design: VentilationDesign,
}

impl ZoneLoadRecord {
    /// Fresh record with the synthesized availability schedule names
    pub fn new(zone_id: &str) -> Self {
        let (heating, cooling) = crate::constants::availability_schedule_names(zone_id);
        Self {
            heating_availability_schedule: heating,
            cooling_availability_schedule: cooling,
            ..Default::default()
        }
    }
}

/// Raw `ZoneInfiltration:DesignFlowRate` terms
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InfiltrationDesign {
    pub design_flow_rate: Option<f64>,
    pub flow_per_zone_floor_area: Option<f64>,
    pub flow_per_exterior_surface_area: Option<f64>,
    pub air_changes_per_hour: Option<f64>,
}

/// Raw `ZoneVentilation:DesignFlowRate` terms
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VentilationDesign {
    pub design_flow_rate: Option<f64>,
    pub flow_per_zone_floor_area: Option<f64>,
    pub flow_per_person: Option<f64>,
    pub air_changes_per_hour: Option<f64>,
}
