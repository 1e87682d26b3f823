//! Application constants for IDF extraction
//!
//! This module contains the lexical conventions of the IDF format, the default
//! settings catalog, the object keywords the extractors recognise and the
//! substrings behind the name-based heuristics.

// =============================================================================
// Lexical Conventions
// =============================================================================

/// Comment marker; runs to end of line
pub const COMMENT_MARKER: char = '!';

/// Field separator inside an object definition
pub const FIELD_SEPARATOR: char = ',';

/// Object terminator
pub const OBJECT_TERMINATOR: char = ';';

/// Separator between a settings-comment key and its value
pub const SETTING_KEY_SEPARATOR: char = ':';

// =============================================================================
// Object Keywords
// =============================================================================

/// IDF object keywords recognised by the extractors
pub mod keywords {
    pub const ZONE: &str = "Zone";
    pub const PEOPLE: &str = "People";
    pub const LIGHTS: &str = "Lights";
    pub const OTHER_EQUIPMENT: &str = "OtherEquipment";
    pub const ZONE_CONTROL_THERMOSTAT: &str = "ZoneControl:Thermostat";
    pub const THERMOSTAT_DUAL_SETPOINT: &str = "ThermostatSetpoint:DualSetpoint";
    pub const ZONE_INFILTRATION: &str = "ZoneInfiltration:DesignFlowRate";
    pub const ZONE_VENTILATION: &str = "ZoneVentilation:DesignFlowRate";
    pub const SCHEDULE_COMPACT: &str = "Schedule:Compact";
}

// =============================================================================
// Settings Catalog
// =============================================================================

/// Placeholder for any catalog key never matched in the stream
pub const NOT_FOUND: &str = "Not Found";

/// Default simulation engine name used by the Version formatter
pub const DEFAULT_ENGINE_NAME: &str = "EnergyPlus";

/// Category holding settings carried as top-level comments
pub const GEOMETRY_CATEGORY: &str = "Geometry Settings";

/// Default settings catalog, in report order
pub const SETTINGS_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "General Settings",
        &[
            "Version",
            "RunPeriod",
            "Timestep",
            "ConvergenceLimits",
            "SimulationControl",
        ],
    ),
    (
        GEOMETRY_CATEGORY,
        &[
            "Geometry convention template",
            "Zone geometry and surface areas",
            "Zone volume calculation method",
            "Zone floor area calculation method",
            "Window to wall ratio method",
        ],
    ),
    ("Location Settings", &["Site:Location"]),
    (
        "Ground Temperature Settings",
        &[
            "Site:GroundTemperature:BuildingSurface",
            "Site:GroundTemperature:Deep",
            "Site:GroundTemperature:Shallow",
            "Site:GroundTemperature:FCfactorMethod",
        ],
    ),
    (
        "Ground Reflectance Settings",
        &[
            "Site:GroundReflectance",
            "Site:GroundReflectance:SnowModifier",
        ],
    ),
];

/// Month abbreviations used to label monthly series
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Columns per row in a rendered monthly grid
pub const MONTHLY_GRID_COLUMNS: usize = 4;

/// Cell width in a rendered monthly grid
pub const MONTHLY_GRID_CELL_WIDTH: usize = 8;

// =============================================================================
// Heuristics
// =============================================================================

/// Name substrings marking a schedule as a thermostat setpoint schedule
pub const DEFAULT_SETPOINT_INDICATORS: &[&str] = &["Setpoint", "SP"];

/// Name substrings marking `OtherEquipment` as non-fixed
pub const DEFAULT_NON_FIXED_EQUIPMENT_MARKERS: &[&str] = &["non fixed", "miscellaneous"];

/// Field substring associating a value with a zone's schedule set
pub const SCHEDULE_NAME_MARKER: &str = "schedule";

/// Substring removed from thermostat zone references
pub const THERMOSTAT_SUFFIX: &str = "Thermostat";

/// Suffix of the synthesized heating availability schedule name
pub const HEATING_AVAILABILITY_SUFFIX: &str = "Heating Availability Sch";

/// Suffix of the synthesized cooling availability schedule name
pub const COOLING_AVAILABILITY_SUFFIX: &str = "Cooling Availability Sch";

// =============================================================================
// Schedule Time Expansion
// =============================================================================

pub const MINUTES_PER_HOUR: u32 = 60;
pub const HOURS_PER_DAY: u32 = 24;
pub const MINUTES_PER_DAY: u32 = HOURS_PER_DAY * MINUTES_PER_HOUR;
pub const MAX_HOUR: u32 = 23;
pub const MAX_MINUTE: u32 = 59;

/// Value for slots no time/value pair covers when no pairs exist at all
pub const DEFAULT_SCHEDULE_VALUE: &str = "0";

/// Seconds per hour, for m3/s to air-changes-per-hour conversion
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Look up a month number from a full or abbreviated English month name
pub fn month_number(name: &str) -> Option<u32> {
    match name.trim().to_lowercase().as_str() {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Build the synthesized availability schedule names for a zone
///
/// These are a naming convention, not values read from the model file.
pub fn availability_schedule_names(zone_id: &str) -> (String, String) {
    (
        format!("{} {}", zone_id, HEATING_AVAILABILITY_SUFFIX),
        format!("{} {}", zone_id, COOLING_AVAILABILITY_SUFFIX),
    )
}
